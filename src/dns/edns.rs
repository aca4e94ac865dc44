//! EDNS0 OPT pseudo-record.

use super::wire::{Reader, Writer};
use super::{OPTION_NSID, TYPE_OPT};
use crate::error::DecodeError;

/// An option carried in the OPT RDATA.
///
/// Only NSID is interpreted; anything else is skipped while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdnsOption {
    Nsid(Vec<u8>),
}

/// Contents of an OPT record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edns {
    /// Requestor's UDP payload size (the CLASS field of the OPT record).
    pub udp_payload_size: u16,
    /// Upper 8 bits of the extended RCODE.
    pub extended_rcode: u8,
    pub version: u8,
    pub dnssec_ok: bool,
    pub options: Vec<EdnsOption>,
}

impl Edns {
    /// An OPT record with no options, advertising `udp_payload_size`.
    pub fn new(udp_payload_size: u16) -> Self {
        Self {
            udp_payload_size,
            extended_rcode: 0,
            version: 0,
            dnssec_ok: false,
            options: Vec::new(),
        }
    }

    /// Whether the client asked for the server's NSID.
    pub fn requests_nsid(&self) -> bool {
        self.options
            .iter()
            .any(|opt| matches!(opt, EdnsOption::Nsid(_)))
    }

    /// Read the fields following the owner name and TYPE of an OPT record.
    pub(super) fn decode_body(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let udp_payload_size = r.read_u16("OPT payload size")?;
        let ttl = r.read_u32("OPT extended rcode")?;
        let rdlen = r.read_u16("OPT length")? as usize;

        let rdata = r.read_bytes(rdlen, "OPT data")?;
        let mut opts = Reader::new(rdata);
        let mut options = Vec::new();

        while opts.remaining() > 0 {
            let code = opts.read_u16("option code")?;
            let len = opts.read_u16("option length")? as usize;
            if len > opts.remaining() {
                return Err(DecodeError::OptionOverrun {
                    declared: len,
                    remaining: opts.remaining(),
                });
            }
            let payload = opts.read_bytes(len, "option data")?;
            if code == OPTION_NSID {
                options.push(EdnsOption::Nsid(payload.to_vec()));
            }
        }

        Ok(Self {
            udp_payload_size,
            extended_rcode: (ttl >> 24) as u8,
            version: (ttl >> 16) as u8,
            dnssec_ok: ttl & 0x8000 != 0,
            options,
        })
    }

    /// Append a complete OPT record.
    pub(super) fn encode(&self, w: &mut Writer) {
        w.put_u8(0); // root owner name
        w.put_u16(TYPE_OPT);
        w.put_u16(self.udp_payload_size);

        let mut ttl = ((self.extended_rcode as u32) << 24) | ((self.version as u32) << 16);
        if self.dnssec_ok {
            ttl |= 0x8000;
        }
        w.put_u32(ttl);

        let mut rdata = Writer::with_capacity(64);
        for opt in &self.options {
            match opt {
                EdnsOption::Nsid(payload) => {
                    rdata.put_u16(OPTION_NSID);
                    rdata.put_len_prefixed(payload);
                }
            }
        }
        w.put_len_prefixed(&rdata.into_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(size: u16, ttl: u32, rdata: &[u8]) -> Vec<u8> {
        let mut w = Writer::with_capacity(32);
        w.put_u16(size);
        w.put_u32(ttl);
        w.put_len_prefixed(rdata);
        w.into_vec()
    }

    #[test]
    fn decode_without_options() {
        let data = body(4096, 0, &[]);
        let edns = Edns::decode_body(&mut Reader::new(&data)).unwrap();

        assert_eq!(edns, Edns::new(4096));
        assert!(!edns.requests_nsid());
    }

    #[test]
    fn decode_recognizes_nsid() {
        let data = body(1232, 0x0000_8000, &[0, 3, 0, 0]);
        let edns = Edns::decode_body(&mut Reader::new(&data)).unwrap();

        assert!(edns.requests_nsid());
        assert!(edns.dnssec_ok);
        assert_eq!(edns.udp_payload_size, 1232);
    }

    #[test]
    fn decode_skips_unknown_options() {
        // COOKIE (10) with 8 bytes, then NSID
        let rdata = [0, 10, 0, 8, 1, 2, 3, 4, 5, 6, 7, 8, 0, 3, 0, 0];
        let data = body(4096, 0, &rdata);
        let edns = Edns::decode_body(&mut Reader::new(&data)).unwrap();

        assert_eq!(edns.options, vec![EdnsOption::Nsid(Vec::new())]);
    }

    #[test]
    fn decode_option_overrun_fails() {
        let data = body(4096, 0, &[0, 10, 0, 8, 1, 2]);
        let err = Edns::decode_body(&mut Reader::new(&data)).unwrap_err();

        assert_eq!(
            err,
            DecodeError::OptionOverrun {
                declared: 8,
                remaining: 2
            }
        );
    }

    #[test]
    fn decode_truncated_rdata_fails() {
        let mut data = body(4096, 0, &[0, 3, 0, 0]);
        data.truncate(data.len() - 2);

        assert!(Edns::decode_body(&mut Reader::new(&data)).is_err());
    }

    #[test]
    fn encode_with_nsid() {
        let mut edns = Edns::new(4096);
        edns.options.push(EdnsOption::Nsid(b"ns1".to_vec()));

        let mut w = Writer::with_capacity(32);
        edns.encode(&mut w);

        assert_eq!(
            w.into_vec(),
            vec![0, 0, 41, 0x10, 0x00, 0, 0, 0, 0, 0, 7, 0, 3, 0, 3, b'n', b's', b'1']
        );
    }

    #[test]
    fn encode_without_options_has_empty_rdata() {
        let mut w = Writer::with_capacity(16);
        Edns::new(512).encode(&mut w);

        assert_eq!(w.into_vec(), vec![0, 0, 41, 0x02, 0x00, 0, 0, 0, 0, 0, 0]);
    }
}
