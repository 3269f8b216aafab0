//! Line segmentation and address token recognition.
//!
//! Splits a line into alternating whitespace and token segments so the
//! rewriter can substitute address-shaped tokens while reproducing all
//! other text byte-for-byte.

use std::net::Ipv4Addr;

/// One run of a line: either whitespace or a token candidate.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// A maximal run of whitespace, preserved verbatim.
    Gap(&'a str),
    /// A maximal run of non-whitespace characters.
    Token(&'a str),
}

/// Iterates over the segments of a line in order. Concatenating the
/// segments yields the input unchanged.
pub(crate) fn segments(line: &str) -> Segments<'_> {
    Segments { rest: line }
}

pub(crate) struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let first = self.rest.chars().next()?;
        let in_gap = first.is_whitespace();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != in_gap)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (segment, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if in_gap {
            Segment::Gap(segment)
        } else {
            Segment::Token(segment)
        })
    }
}

/// Returns true if a token is address-shaped.
///
/// A token qualifies only if the whole token parses as a dotted-quad
/// IPv4 address; "1.2.3", "1.2.3.4.5" and "1.2.3.4:80" do not. Tokens
/// that fail this test never reach the resolver.
pub(crate) fn is_address(token: &str) -> bool {
    token.parse::<Ipv4Addr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &str) -> Vec<Segment<'_>> {
        segments(line).collect()
    }

    #[test]
    fn test_empty_line_has_no_segments() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_segments_alternate_and_round_trip() {
        let line = "  10.0.0.1 GET /index.html\t200 ";
        let segs = collect(line);

        let rebuilt: String = segs
            .iter()
            .map(|s| match s {
                Segment::Gap(t) | Segment::Token(t) => *t,
            })
            .collect();
        assert_eq!(rebuilt, line);

        assert_eq!(segs[0], Segment::Gap("  "));
        assert_eq!(segs[1], Segment::Token("10.0.0.1"));
        assert_eq!(segs[2], Segment::Gap(" "));
    }

    #[test]
    fn test_whitespace_only_line() {
        assert_eq!(collect(" \t "), vec![Segment::Gap(" \t ")]);
    }

    #[test]
    fn test_is_address_accepts_dotted_quad() {
        assert!(is_address("128.34.12.5"));
        assert!(is_address("0.0.0.0"));
        assert!(is_address("255.255.255.255"));
    }

    #[test]
    fn test_is_address_rejects_non_addresses() {
        assert!(!is_address("www.foobar.com"));
        assert!(!is_address("1.2.3"));
        assert!(!is_address("1.2.3.4.5"));
        assert!(!is_address("256.1.1.1"));
        assert!(!is_address("1.2.3.4:80"));
        assert!(!is_address(""));
    }
}
