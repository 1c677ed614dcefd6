use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Some byte sequences were invalid and replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decodes raw page bytes to UTF-8: BOM, then Content-Type charset, then detection.
///
/// Detection is hinted with the page's top-level domain when a URL is known.
/// Decoding is lossy and never fails.
pub fn decode_html(
    bytes: &[u8],
    content_type: Option<&str>,
    page_url: Option<&Url>,
) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(enc) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc);
    }

    let tld = page_url
        .and_then(|url| url.host_str())
        .and_then(|host| host.rsplit('.').next())
        .filter(|tld| tld.chars().all(|c| c.is_ascii_alphabetic()));
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(tld.map(str::as_bytes), true);
    decode_with(bytes, enc)
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(['"', '\'']);
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, used, had_errors) = enc.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}
