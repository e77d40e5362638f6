//! Render-time text decoding.
//!
//! Question-bank strings may arrive percent-encoded and HTML-escaped. Decoding happens only when
//! text is shown; stored answers stay raw so comparisons against the correct answer are exact.

// std
use std::borrow::Cow;
// crates.io
use percent_encoding::percent_decode_str;

/// Decodes percent escapes, then HTML entities.
pub fn decode_text(raw: &str) -> String {
	let percent_decoded: Cow<str> = percent_decode_str(raw).decode_utf8_lossy();

	html_escape::decode_html_entities(&percent_decoded).into_owned()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_html_entities() {
		assert_eq!(decode_text("What does &quot;CPU&quot; stand for?"), "What does \"CPU\" stand for?");
		assert_eq!(decode_text("Rock &amp; Roll"), "Rock & Roll");
		assert_eq!(decode_text("It&#039;s"), "It's");
	}

	#[test]
	fn decodes_percent_escapes() {
		assert_eq!(decode_text("Caf%C3%A9%20au%20lait"), "Café au lait");
	}

	#[test]
	fn leaves_plain_text_alone() {
		assert_eq!(decode_text("100% sure"), "100% sure");
		assert_eq!(decode_text("Plain answer"), "Plain answer");
	}
}
