//! Message decoding and encoding.

use super::edns::Edns;
use super::name::{Name, decode_name};
use super::wire::{Reader, Writer};
use super::{DEFAULT_UDP_SIZE, Rcode, TYPE_OPT};
use crate::error::DecodeError;

const FLAG_QR: u16 = 0x8000;
const FLAG_RD: u16 = 0x0100;

/// The question section entry. The name keeps the bytes it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Name,
    pub qtype: u16,
    pub qclass: u16,
}

/// An answer record. The RDLENGTH is derived from `rdata` when encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

/// A DNS message holding exactly one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u16,
    /// QR bit clear.
    pub is_query: bool,
    pub opcode: u8,
    pub recursion_desired: bool,
    pub rcode: u8,
    pub question: Question,
    pub answers: Vec<ResourceRecord>,
    pub edns: Option<Edns>,
}

impl Message {
    /// Parse a message.
    ///
    /// Answer records are kept, authority records are skipped. When the
    /// additional count is non-zero the first additional record is
    /// inspected: an OPT record fills in [`Message::edns`], anything else is
    /// ignored.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(buf);

        let id = r.read_u16("id")?;
        let flags = r.read_u16("flags")?;
        let qdcount = r.read_u16("question count")?;
        let ancount = r.read_u16("answer count")?;
        let nscount = r.read_u16("authority count")?;
        let arcount = r.read_u16("additional count")?;

        if qdcount != 1 {
            return Err(DecodeError::QuestionCount(qdcount));
        }

        let question = Question {
            name: decode_name(&mut r)?,
            qtype: r.read_u16("question type")?,
            qclass: r.read_u16("question class")?,
        };

        let answers = (0..ancount)
            .map(|_| decode_record(&mut r))
            .collect::<Result<Vec<_>, _>>()?;
        for _ in 0..nscount {
            decode_record(&mut r)?;
        }

        let mut edns = None;
        if arcount > 0 {
            let owner = decode_name(&mut r)?;
            let rtype = r.read_u16("additional type")?;
            if owner.is_root() && rtype == TYPE_OPT {
                edns = Some(Edns::decode_body(&mut r)?);
            }
        }

        Ok(Self {
            id,
            is_query: flags & FLAG_QR == 0,
            opcode: ((flags >> 11) & 0x0f) as u8,
            recursion_desired: flags & FLAG_RD != 0,
            rcode: (flags & 0x0f) as u8,
            question,
            answers,
            edns,
        })
    }

    /// Build the reply to `query`, echoing its id, opcode, RD bit and question.
    pub fn reply(
        query: &Message,
        rcode: Rcode,
        answers: Vec<ResourceRecord>,
        edns: Option<Edns>,
    ) -> Self {
        Self {
            id: query.id,
            is_query: false,
            opcode: query.opcode,
            recursion_desired: query.recursion_desired,
            rcode: rcode.to_u8(),
            question: query.question.clone(),
            answers,
            edns,
        }
    }

    /// Serialize as a response. The QR bit is always set.
    ///
    /// The output is not truncated to the advertised payload size.
    pub fn encode(&self) -> Vec<u8> {
        let size = self
            .edns
            .as_ref()
            .map_or(DEFAULT_UDP_SIZE, |e| e.udp_payload_size);
        let mut w = Writer::with_capacity(size as usize);

        let mut flags = FLAG_QR | ((self.opcode as u16 & 0x0f) << 11) | (self.rcode as u16 & 0x0f);
        if self.recursion_desired {
            flags |= FLAG_RD;
        }

        w.put_u16(self.id);
        w.put_u16(flags);
        w.put_u16(1);
        w.put_u16(self.answers.len() as u16);
        w.put_u16(0);
        w.put_u16(u16::from(self.edns.is_some()));

        w.put_slice(self.question.name.as_wire());
        w.put_u16(self.question.qtype);
        w.put_u16(self.question.qclass);

        for rr in &self.answers {
            w.put_slice(rr.name.as_wire());
            w.put_u16(rr.rtype);
            w.put_u16(rr.class);
            w.put_u32(rr.ttl);
            w.put_len_prefixed(&rr.rdata);
        }

        if let Some(edns) = &self.edns {
            edns.encode(&mut w);
        }

        w.into_vec()
    }
}

fn decode_record(r: &mut Reader<'_>) -> Result<ResourceRecord, DecodeError> {
    let name = decode_name(r)?;
    let rtype = r.read_u16("record type")?;
    let class = r.read_u16("record class")?;
    let ttl = r.read_u32("record ttl")?;
    let rdlen = r.read_u16("record length")? as usize;
    let rdata = r.read_bytes(rdlen, "record data")?.to_vec();

    Ok(ResourceRecord {
        name,
        rtype,
        class,
        ttl,
        rdata,
    })
}
