use wirepilot_core::SplitTunnelPolicy;

const PEER_HEADER: &str = "[Peer]";

/// Inserts the policy's directive into the first `[Peer]` section.
///
/// The line lands just before the next section header (ahead of any blank
/// lines separating the two), at end of input when `[Peer]` is the last
/// section, or appended when there is no `[Peer]` at all. Every other line
/// is kept in order. Without a directive the text is returned unchanged.
pub fn inject_split_tunneling(text: &str, policy: &SplitTunnelPolicy) -> String {
    let Some(directive) = policy.directive() else {
        return text.to_string();
    };

    let mut lines: Vec<&str> = text.lines().collect();
    let index = injection_index(&lines);
    lines.insert(index, directive.as_str());

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn is_section_header(line: &str) -> bool {
    line.trim_start().starts_with('[')
}

fn injection_index(lines: &[&str]) -> usize {
    let Some(peer) = lines
        .iter()
        .position(|line| line.trim().eq_ignore_ascii_case(PEER_HEADER))
    else {
        return lines.len();
    };

    let body_start = peer + 1;
    let mut end = lines[body_start..]
        .iter()
        .position(|line| is_section_header(line))
        .map(|offset| body_start + offset)
        .unwrap_or(lines.len());

    while end > body_start && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "[Interface]\n\
PrivateKey = abc=\n\
Address = 10.0.0.2/32\n\
\n\
[Peer]\n\
PublicKey = def=\n\
Endpoint = 1.2.3.4:51820\n\
AllowedIPs = 0.0.0.0/0\n";

    fn include(names: &[&str]) -> SplitTunnelPolicy {
        SplitTunnelPolicy::new(names.iter().map(|n| n.to_string()).collect(), Vec::new())
    }

    fn exclude(names: &[&str]) -> SplitTunnelPolicy {
        SplitTunnelPolicy::new(Vec::new(), names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn test_empty_policy_returns_input() {
        let text = "[Peer]\r\nPublicKey = x\r\n";
        assert_eq!(inject_split_tunneling(text, &SplitTunnelPolicy::default()), text);
    }

    #[test]
    fn test_peer_at_end_gets_directive_last() {
        let output = inject_split_tunneling(BASE, &include(&["game.exe", "launcher.exe"]));
        assert!(output.ends_with("AllowedIPs = 0.0.0.0/0\nAllowedApps = game.exe, launcher.exe\n"));
        assert!(output.starts_with("[Interface]\nPrivateKey = abc=\n"));
    }

    #[test]
    fn test_directive_stays_inside_peer_section() {
        let text = "[Interface]\nAddress = 10.0.0.2/32\n\n[Peer]\nPublicKey = def=\n\n[Extra]\nKey = value\n";
        let output = inject_split_tunneling(text, &exclude(&["steam.exe"]));
        assert_eq!(
            output,
            "[Interface]\nAddress = 10.0.0.2/32\n\n[Peer]\nPublicKey = def=\nDisallowedApps = steam.exe\n\n[Extra]\nKey = value\n"
        );
    }

    #[test]
    fn test_only_first_peer_is_touched() {
        let text = "[Peer]\nPublicKey = a\n[Peer]\nPublicKey = b\n";
        let output = inject_split_tunneling(text, &include(&["x.exe"]));
        assert_eq!(
            output,
            "[Peer]\nPublicKey = a\nAllowedApps = x.exe\n[Peer]\nPublicKey = b\n"
        );
    }

    #[test]
    fn test_peer_header_match_ignores_case_and_padding() {
        let text = "[Interface]\nAddress = 10.0.0.2/32\n  [peer]  \nPublicKey = a\n[Other]\n";
        let output = inject_split_tunneling(text, &include(&["x.exe"]));
        assert!(output.contains("PublicKey = a\nAllowedApps = x.exe\n[Other]"));
    }

    #[test]
    fn test_missing_peer_appends_at_end() {
        let text = "[Interface]\nAddress = 10.0.0.2/32\n";
        let output = inject_split_tunneling(text, &include(&["x.exe"]));
        assert_eq!(output, "[Interface]\nAddress = 10.0.0.2/32\nAllowedApps = x.exe\n");
    }

    #[test]
    fn test_include_wins_and_no_disallowed_line() {
        let policy = SplitTunnelPolicy::new(vec!["game.exe".into()], vec!["other.exe".into()]);
        let output = inject_split_tunneling(BASE, &policy);
        assert!(output.contains("AllowedApps = game.exe"));
        assert!(!output.contains("DisallowedApps"));
    }

    #[test]
    fn test_pristine_base_always_yields_one_directive() {
        let policy = include(&["game.exe"]);
        let first = inject_split_tunneling(BASE, &policy);
        let second = inject_split_tunneling(BASE, &policy);
        assert_eq!(first, second);
        assert_eq!(first.matches("AllowedApps =").count(), 1);
    }

    #[test]
    fn test_crlf_input_is_normalised() {
        let text = "[Peer]\r\nPublicKey = a\r\n";
        let output = inject_split_tunneling(text, &include(&["x.exe"]));
        assert_eq!(output, "[Peer]\nPublicKey = a\nAllowedApps = x.exe\n");
    }
}
