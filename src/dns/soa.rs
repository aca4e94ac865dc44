//! SOA record data.

use super::name::encode_name;
use super::wire::Writer;

/// Start-of-authority parameters for a zone.
///
/// `rname` is the responsible mailbox in domain-name form, with `.` in place
/// of `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl SoaData {
    /// RDATA layout: mname, rname, then serial, refresh, retry, expire and
    /// minimum as 32-bit big-endian counters.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(self.mname.len() + self.rname.len() + 24);
        encode_name(&mut w, &self.mname);
        encode_name(&mut w, &self.rname);
        w.put_u32(self.serial);
        w.put_u32(self.refresh);
        w.put_u32(self.retry);
        w.put_u32(self.expire);
        w.put_u32(self.minimum);
        w.into_vec()
    }
}
