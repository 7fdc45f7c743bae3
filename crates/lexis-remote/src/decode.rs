use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};
use reqwest::header::{CONTENT_TYPE, HeaderMap};

use crate::error::SyncError;

/// The `charset` parameter of a content-type value
pub fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Body encoding declared by the response, UTF-8 when none is given
pub(crate) fn response_encoding(headers: &HeaderMap) -> Result<&'static Encoding, SyncError> {
    let label = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(charset_label);

    match label {
        None => Ok(UTF_8),
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| SyncError::UnsupportedCharset(label.to_string())),
    }
}

/// Incremental decoder turning body chunks into complete lines.
///
/// Multi-byte sequences split across chunks are carried over. Lines end at
/// `\n` or `\r\n`; a final unterminated line is returned by [`finish`].
/// BOM handling is left to the caller.
///
/// [`finish`]: LineDecoder::finish
pub struct LineDecoder {
    decoder: Decoder,
    pending: String,
}

impl LineDecoder {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder_without_bom_handling(),
            pending: String::new(),
        }
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode(chunk, false);
        self.take_lines()
    }

    pub fn finish(mut self) -> Vec<String> {
        self.decode(&[], true);
        let mut lines = self.take_lines();
        if !self.pending.is_empty() {
            lines.extend(self.pending.lines().map(str::to_string));
        }
        lines
    }

    fn decode(&mut self, mut input: &[u8], last: bool) {
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or(input.len() * 3 + 16);
            self.pending.reserve(needed);

            let (result, read, _) = self.decoder.decode_to_string(input, &mut self.pending, last);
            input = &input[read..];
            if let CoderResult::InputEmpty = result {
                break;
            }
        }
    }

    fn take_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.pending.rfind('\n') else {
            return vec![];
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        complete.lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use encoding_rs::GBK;
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn reads_charset_parameter() {
        assert_eq!(charset_label("text/plain; charset=GBK"), Some("GBK"));
        assert_eq!(charset_label("text/plain;Charset=\"utf-8\""), Some("utf-8"));
        assert_eq!(charset_label("text/plain"), None);
    }

    #[test]
    fn missing_content_type_is_utf8() {
        assert_eq!(response_encoding(&HeaderMap::new()).unwrap(), UTF_8);
    }

    #[test]
    fn unknown_charset_is_an_error() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=klingon"));
        assert!(matches!(
            response_encoding(&headers),
            Err(SyncError::UnsupportedCharset(ref l)) if l == "klingon"
        ));
    }

    #[test]
    fn splits_lines_across_chunks() {
        let mut decoder = LineDecoder::new(UTF_8);
        let body = "苹果 add n 5\r\n香蕉\n\n桃".as_bytes();
        // cut inside the first multi-byte character
        let (a, b) = body.split_at(2);

        assert!(decoder.feed(a).is_empty());
        assert_eq!(decoder.feed(b), vec!["苹果 add n 5", "香蕉", ""]);
        assert_eq!(decoder.finish(), vec!["桃"]);
    }

    #[test]
    fn no_trailing_empty_line() {
        let mut decoder = LineDecoder::new(UTF_8);
        assert_eq!(decoder.feed(b"a\nb\n"), vec!["a", "b"]);
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn decodes_declared_charset() {
        let (bytes, _, _) = GBK.encode("词典 delete\n");
        let mut decoder = LineDecoder::new(GBK);
        assert_eq!(decoder.feed(&bytes), vec!["词典 delete"]);
    }

    #[test]
    fn keeps_bom_for_caller() {
        let mut decoder = LineDecoder::new(UTF_8);
        assert_eq!(decoder.feed(b"\xEF\xBB\xBFword\n"), vec!["\u{feff}word"]);
    }
}
