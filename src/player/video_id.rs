//! 動画 ID の抽出
//!
//! watch / youtu.be / embed 形式の URL と 11 文字の生 ID を受け付ける。

use url::Url;

const ID_LEN: usize = 11;

fn is_valid_id(s: &str) -> bool {
    s.len() == ID_LEN
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Extract the canonical 11-character video id, or `None` for malformed input.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if is_valid_id(input) {
        return Some(input.to_string());
    }

    // "youtu.be/xxx" without a scheme does not parse as an absolute URL;
    // retry with an https prefix before giving up.
    let parsed = Url::parse(input)
        .ok()
        .filter(|u| u.has_host())
        .or_else(|| Url::parse(&format!("https://{input}")).ok())?;

    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let candidate = match host {
        "youtu.be" => parsed.path_segments()?.next().map(str::to_string),
        "youtube.com" | "m.youtube.com" => {
            let mut segments = parsed.path_segments()?;
            match segments.next() {
                Some("watch") => parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("embed") => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;

    is_valid_id(&candidate).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_forms_and_bare_id_yield_the_same_id() {
        let expected = Some("abc123XYZ_d".to_string());
        assert_eq!(extract_video_id("abc123XYZ_d"), expected);
        assert_eq!(extract_video_id("https://youtu.be/abc123XYZ_d"), expected);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123XYZ_d"),
            expected
        );
        assert_eq!(
            extract_video_id("https://youtube.com/embed/abc123XYZ_d"),
            expected
        );
    }

    #[test]
    fn scheme_less_urls_are_accepted() {
        assert_eq!(
            extract_video_id("youtu.be/abc123XYZ_d"),
            Some("abc123XYZ_d".to_string())
        );
        assert_eq!(
            extract_video_id("www.youtube.com/watch?v=abc123XYZ_d&t=42"),
            Some("abc123XYZ_d".to_string())
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(extract_video_id("not-a-url"), None);
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://example.com/watch?v=abc123XYZ_d"), None);
        // wrong id length
        assert_eq!(extract_video_id("https://youtu.be/abc123XYZ_"), None);
        assert_eq!(extract_video_id("abc123XYZ_d0"), None);
        // invalid characters
        assert_eq!(extract_video_id("abc123XYZ d"), None);
    }
}
