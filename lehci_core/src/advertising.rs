use std::fmt;
use thiserror::Error;

// Body capacity of the LE Set Advertising Data command.
pub const ADVERTISING_DATA_MAX_LEN: usize = 31;

#[derive(Clone, Error, Debug, Eq, PartialEq)]
pub enum AdvertisingError {
    #[error("UUID must be 16 bytes long, got {0}")]
    InvalidUuidLength(usize),
    #[error("advertising payload overflow: segment needs {needed} bytes, {available} available")]
    PayloadOverflow { needed: usize, available: usize },
}

// AD structure type codes.
pub mod ad_type {
    pub const FLAGS: u8 = 0x01;
    pub const NAME_SHORT: u8 = 0x08;
    pub const NAME_COMPLETE: u8 = 0x09;
    pub const MANUFACTURER_SPECIFIC: u8 = 0xFF;
}

/// An encoded advertising payload: a length byte followed by a fixed 31-byte
/// body of length-prefixed segments.
///
/// `length` counts the used body bytes; the rest of the body stays zeroed.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct AdvertisingData {
    length: u8,
    data: [u8; ADVERTISING_DATA_MAX_LEN],
}

impl AdvertisingData {
    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    // The used part of the body.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    // The whole body, including zeroed trailing bytes.
    pub fn body(&self) -> &[u8; ADVERTISING_DATA_MAX_LEN] {
        &self.data
    }

    // Command parameter layout: length byte then the full body.
    pub fn to_bytes(&self) -> [u8; ADVERTISING_DATA_MAX_LEN + 1] {
        let mut out = [0u8; ADVERTISING_DATA_MAX_LEN + 1];
        out[0] = self.length;
        out[1..].copy_from_slice(&self.data);
        out
    }

    pub fn segments(&self) -> Segments<'_> {
        Segments {
            rest: self.payload(),
        }
    }
}

impl fmt::Debug for AdvertisingData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AdvertisingData")
            .field("length", &self.length)
            .field("payload", &format_args!("{:02X?}", self.payload()))
            .finish()
    }
}

/// A single AD structure as found in the payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Segment<'a> {
    pub ad_type: u8,
    pub body: &'a [u8],
}

// Iterates the segments of an encoded payload. Stops at a zero length byte or
// at a segment that runs past the end of the payload.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.rest.split_first()?;
        let len = len as usize;
        if len == 0 || len > tail.len() {
            self.rest = &[];
            return None;
        }
        let (segment, rest) = tail.split_at(len);
        self.rest = rest;
        Some(Segment {
            ad_type: segment[0],
            body: &segment[1..],
        })
    }
}

/// Accumulates segments into an [`AdvertisingData`], refusing any segment that
/// would not fit in the body.
#[derive(Clone, Debug, Default)]
pub struct AdvertisingDataBuilder {
    inner: AdvertisingData,
}

impl AdvertisingDataBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn remaining(&self) -> usize {
        ADVERTISING_DATA_MAX_LEN - self.inner.len()
    }

    // Appends `[len, ad_type, body..]`, where `len` counts the type byte and
    // the body.
    pub fn push_segment(&mut self, ad_type: u8, body: &[u8]) -> Result<(), AdvertisingError> {
        let needed = 2 + body.len();
        let available = self.remaining();
        if needed > available {
            return Err(AdvertisingError::PayloadOverflow { needed, available });
        }
        let start = self.inner.len();
        let data = &mut self.inner.data[start..start + needed];
        data[0] = (needed - 1) as u8;
        data[1] = ad_type;
        data[2..].copy_from_slice(body);
        self.inner.length += needed as u8;
        tracing::trace!(ad_type, len = needed - 1, offset = start, "pushed advertising segment");
        Ok(())
    }

    pub fn build(self) -> AdvertisingData {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ad_type, AdvertisingDataBuilder, AdvertisingError, Segment, ADVERTISING_DATA_MAX_LEN,
    };

    #[test]
    fn empty_payload() {
        let data = AdvertisingDataBuilder::new().build();
        assert!(data.is_empty());
        assert_eq!(data.to_bytes(), [0u8; 32]);
        assert_eq!(data.segments().count(), 0);
    }

    #[test]
    fn segments_are_length_prefixed() {
        let mut builder = AdvertisingDataBuilder::new();
        builder.push_segment(ad_type::FLAGS, &[0x06]).unwrap();
        builder.push_segment(ad_type::NAME_COMPLETE, b"lehci").unwrap();
        let data = builder.build();
        assert_eq!(data.len(), 3 + 7);
        assert_eq!(
            data.payload(),
            &[0x02, 0x01, 0x06, 0x06, 0x09, b'l', b'e', b'h', b'c', b'i']
        );
        assert!(data.body()[data.len()..].iter().all(|&b| b == 0));
        let segments = data.segments().collect::<Vec<_>>();
        assert_eq!(
            segments,
            vec![
                Segment {
                    ad_type: ad_type::FLAGS,
                    body: &[0x06],
                },
                Segment {
                    ad_type: ad_type::NAME_COMPLETE,
                    body: b"lehci",
                },
            ]
        );
    }

    #[test]
    fn overflow_is_rejected_before_writing() {
        let mut builder = AdvertisingDataBuilder::new();
        builder.push_segment(ad_type::FLAGS, &[0x1A]).unwrap();
        let err = builder
            .push_segment(ad_type::MANUFACTURER_SPECIFIC, &[0xAA; 27])
            .unwrap_err();
        assert_eq!(
            err,
            AdvertisingError::PayloadOverflow {
                needed: 29,
                available: 28,
            }
        );
        let data = builder.build();
        assert_eq!(data.len(), 3);
        assert!(data.body()[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn payload_can_fill_the_body_exactly() {
        let mut builder = AdvertisingDataBuilder::new();
        builder
            .push_segment(ad_type::MANUFACTURER_SPECIFIC, &[0x55; ADVERTISING_DATA_MAX_LEN - 2])
            .unwrap();
        assert_eq!(builder.remaining(), 0);
        assert!(builder.push_segment(ad_type::FLAGS, &[]).is_err());
        let data = builder.build();
        assert_eq!(data.to_bytes()[0], 31);
        assert_eq!(data.to_bytes()[1], 30);
    }
}
