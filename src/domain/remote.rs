/// Browser URL of a repository from its remote URL.
///
/// A trailing ".git" (and slash) is stripped. scp-style SSH remotes
/// (`git@host:owner/repo`) and `ssh://` URLs become `https://host/owner/repo`
/// so compare and archive links resolve in a browser.
pub fn web_url(remote_url: &str) -> String {
    let trimmed = remote_url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    if let Some(rest) = trimmed.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map(|(_, host)| host).unwrap_or(rest);
        return format!("https://{}", rest);
    }

    if !trimmed.contains("://") {
        if let Some((user_host, path)) = trimmed.split_once(':') {
            let host = user_host
                .split_once('@')
                .map(|(_, host)| host)
                .unwrap_or(user_host);
            return format!("https://{}/{}", host, path);
        }
    }

    trimmed.to_string()
}

/// Last path segment of a remote URL, e.g. "tool" for ".../acme/tool.git"
pub fn project_name(remote_url: &str) -> String {
    web_url(remote_url)
        .rsplit(|c: char| c == '/' || c == ':')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url_strips_git_suffix() {
        assert_eq!(
            web_url("https://github.com/acme/tool.git"),
            "https://github.com/acme/tool"
        );
        assert_eq!(
            web_url("https://github.com/acme/tool"),
            "https://github.com/acme/tool"
        );
    }

    #[test]
    fn test_scp_style_ssh_url() {
        assert_eq!(
            web_url("git@github.com:acme/tool.git"),
            "https://github.com/acme/tool"
        );
    }

    #[test]
    fn test_ssh_scheme_url() {
        assert_eq!(
            web_url("ssh://git@github.com/acme/tool.git"),
            "https://github.com/acme/tool"
        );
    }

    #[test]
    fn test_only_trailing_git_is_stripped() {
        assert_eq!(
            web_url("https://example.com/acme/tool.github.io.git"),
            "https://example.com/acme/tool.github.io"
        );
    }

    #[test]
    fn test_project_name() {
        assert_eq!(project_name("git@github.com:acme/tool.git"), "tool");
        assert_eq!(project_name("https://github.com/acme/widget/"), "widget");
    }
}
