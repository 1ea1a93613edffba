//! Canned replies for the public informational commands.

/// Reply lines for a public command, or `None` when the command is unknown.
///
/// Matching is exact and case-sensitive on the text after the prefix.
pub fn lookup(command: &str) -> Option<&'static [&'static str]> {
    let lines: &'static [&'static str] = match command {
        "budgie" => &[
            "Budgie, our flagship desktop environment, is made available over at https://github.com/solus-project/budgie-desktop.",
            "If you have an issue with Budgie, please go to its dedicated issue tracker and file an issue, so we can work towards addressing it for all of our users!",
        ],
        "contribute" | "getinvolved" => &[
            "We always love more contributions from even more people! If you want to contribute to Solus, we'd love for you to check out https://getsol.us/articles/contributing/getting-involved/en/",
        ],
        "dev" | "phab" => &[
            "We have a development tracker which enables you to report issues, file package requests, and more. Feel free to check it out at https://dev.getsol.us",
        ],
        "docs" | "help" | "helpcenter" => &[
            "We have documentation available on our Help Center, available at https://getsol.us/help-center/home/",
        ],
        "download" | "get" => &[
            "You can get the latest release of Solus and any of its editions over at https://getsol.us/download/",
        ],
        "eopkg" => &[
            "Solus uses its own, unique, package manager called eopkg. To learn about package management on Solus, go to https://getsol.us/articles/package-management/",
        ],
        "eta" => &["Solus does not provide ETAs. It's ready when it's ready."],
        "facebook" => &["Solus has a Facebook account at https://facebook.com/get.solus"],
        "flarum" | "forums" => &[
            "We have forums available to discuss a wide range of topics. Feel free to check it out at https://dev.getsol.us. You can sign in with your Dev Tracker or GitHub account!",
        ],
        "guidelines" | "rules" => &[
            "Solus always aims to provide a friendly, healthy environment for all users. Please ensure you read and follow our Community Guidelines, which can be found at https://getsol.us/articles/contributing/community-guidelines/en/",
            "In the event you have a concern or issue with another member of our community, please reach out to a member of the Core Team immediately.",
        ],
        "mastodon" => &["Solus has a Mastodon account at https://mastodon.cloud/@SolusProject"],
        "packaging" => &[
            "Want to get started with packaging under Solus? Check out https://getsol.us/articles/packaging/",
        ],
        "reddit" => &["Solus has its own subreddit at https://reddit.com/r/SolusProject"],
        "roadmap" => &[
            "Solus has a dedicated Roadmap page where you can find out what our short-term and long-term plans are, available at https://getsol.us/solus/roadmap/",
        ],
        "social" => &[
            "Solus has a multitude of accounts across various social networks and mediums. You can see all the places we are at by going to https://getsol.us/articles/contributing/getting-involved/en/#social-media",
        ],
        "twitter" => &["Solus has a Twitter account at https://twitter.com/SolusProject"],
        _ => return None,
    };
    Some(lines)
}
