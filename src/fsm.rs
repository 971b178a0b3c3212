use crate::dns_parser::{self, flags, Class, Name, Packet, Question, ResourceRecord, Type};
use crate::store::{split_domain, RecordStore, StoreEntry};
use log::{debug, error, trace, warn};
use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::net::SocketAddr;
use std::sync::Arc;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::{net::UdpSocket, sync::mpsc};

use crate::address_family::AddressFamily;
use crate::config::ResponderConfig;

#[derive(Clone, Debug)]
pub enum Command {
    Shutdown,
}

pub struct FSM<AF: AddressFamily> {
    socket: UdpSocket,
    store: Arc<dyn RecordStore>,
    ttl: u32,
    max_datagram_size: usize,
    commands: mpsc::UnboundedReceiver<Command>,
    outgoing: VecDeque<(Vec<u8>, SocketAddr)>,
    _af: PhantomData<AF>,
}

impl<AF: AddressFamily> FSM<AF> {
    // Will panic if called from outside the context of a runtime
    pub fn new(
        std_socket: std::net::UdpSocket,
        store: &Arc<dyn RecordStore>,
        config: &ResponderConfig,
    ) -> io::Result<(FSM<AF>, mpsc::UnboundedSender<Command>)> {
        let socket = UdpSocket::from_std(std_socket)?;

        let (tx, rx) = mpsc::unbounded_channel();

        let fsm = FSM {
            socket,
            store: store.clone(),
            ttl: config.ttl,
            max_datagram_size: config.max_datagram_size,
            commands: rx,
            outgoing: VecDeque::new(),
            _af: PhantomData,
        };

        Ok((fsm, tx))
    }

    fn recv_packets(&mut self, cx: &mut Context) -> io::Result<()> {
        let mut recv_buf = vec![0u8; self.max_datagram_size];
        loop {
            let mut buf = tokio::io::ReadBuf::new(&mut recv_buf);
            let addr = match self.socket.poll_recv_from(cx, &mut buf) {
                Poll::Ready(Ok(addr)) => addr,
                Poll::Ready(Err(err)) if is_transient(&err) => {
                    debug!("ignoring receive error: {:?}", err);
                    continue;
                }
                Poll::Ready(Err(err)) => return Err(err),
                Poll::Pending => break,
            };
            self.handle_packet(buf.filled(), addr);
        }

        Ok(())
    }

    fn handle_packet(&mut self, buffer: &[u8], addr: SocketAddr) {
        trace!(
            "received {} bytes from {:?}: {}",
            buffer.len(),
            addr,
            HexDump(buffer)
        );

        if let Some(response) = Self::respond(&*self.store, self.ttl, buffer) {
            self.outgoing.push_back((response, addr));
        } else {
            debug!("no response for packet from {:?}", addr);
        }
    }

    /// Turns one request datagram into the bytes to send back
    ///
    /// `None` means the datagram is dropped without a reply.
    pub(crate) fn respond(store: &dyn RecordStore, ttl: u32, buffer: &[u8]) -> Option<Vec<u8>> {
        let packet = Packet::parse(buffer);
        if let Some(ref fault) = packet.fault {
            warn!(
                "couldn't parse packet {:#06x}: {}",
                packet.header.id, fault
            );
            return None;
        }

        let header = &packet.header;
        debug!(
            "request {:#06x}: flags {:#06x}, {} questions, {} answers, {} authority, {} additional",
            header.id,
            header.flags,
            header.questions,
            header.answers,
            header.nameservers,
            header.additional
        );

        let mut matches = Vec::with_capacity(packet.questions.len());
        for question in &packet.questions {
            debug!(
                "received question: {} type {} class {}",
                question.qname, question.qtype, question.qclass
            );
            match Self::lookup(store, question) {
                Ok(entries) => matches.push((question, entries)),
                Err(err) => {
                    error!("record store lookup for {} failed: {}", question.qname, err);
                    return Self::server_failure(&packet);
                }
            }
        }

        match Self::build_answer(&packet, &matches, ttl) {
            Ok(response) => Some(response),
            Err(err) => {
                warn!("couldn't encode response to {:#06x}: {}", header.id, err);
                Self::server_failure(&packet)
            }
        }
    }

    /// Entries of the question's zone that answer its name and type
    fn lookup(store: &dyn RecordStore, question: &Question) -> io::Result<Vec<StoreEntry>> {
        let qtype = match question.query_type() {
            Some(qtype) => qtype,
            None => {
                debug!("unknown query type {} for {}", question.qtype, question.qname);
                return Ok(Vec::new());
            }
        };

        let split = split_domain(question.qname.as_str());
        let mut entries = store.lookup(split.apex)?;
        entries.retain(|entry| {
            entry.matches(split.subdomain) && (qtype == Type::ANY || entry.typ == qtype)
        });
        trace!(
            "{} entries for {:?} in {:?}",
            entries.len(),
            split.subdomain,
            split.apex
        );
        Ok(entries)
    }

    fn build_answer(
        packet: &Packet,
        matches: &[(&Question, Vec<StoreEntry>)],
        ttl: u32,
    ) -> Result<Vec<u8>, dns_parser::Error> {
        let mut answers = Vec::new();
        for (question, entries) in matches {
            for entry in entries {
                answers.push(ResourceRecord {
                    name: Name::from_str(question.qname.as_str()),
                    cls: Class::IN,
                    ttl,
                    data: entry.rdata()?,
                });
            }
        }

        dns_parser::create_response(
            flags::RESPONSE_NO_ERROR,
            &answers,
            &packet.questions,
            &packet.header,
        )
    }

    fn server_failure(packet: &Packet) -> Option<Vec<u8>> {
        match dns_parser::create_response(
            flags::RESPONSE_SERVER_FAILURE,
            &[],
            &packet.questions,
            &packet.header,
        ) {
            Ok(response) => Some(response),
            Err(err) => {
                error!(
                    "dropping {:#06x}, even the failure response can't be encoded: {}",
                    packet.header.id, err
                );
                None
            }
        }
    }
}

impl<AF: Unpin + AddressFamily> Future for FSM<AF> {
    type Output = ();
    fn poll(self: Pin<&mut Self>, cx: &mut Context) -> Poll<()> {
        let pinned = Pin::get_mut(self);
        if let Poll::Ready(cmd) = Pin::new(&mut pinned.commands).poll_recv(cx) {
            match cmd {
                Some(Command::Shutdown) => return Poll::Ready(()),
                None => {
                    warn!("responder disconnected without shutdown");
                    return Poll::Ready(());
                }
            }
        }

        if let Err(err) = pinned.recv_packets(cx) {
            error!("ResponderRecvPacket Error: {:?}", err);
            return Poll::Ready(());
        }

        while let Some((response, addr)) = pinned.outgoing.front() {
            trace!("sending packet to {:?}: {}", addr, HexDump(response));

            match pinned.socket.poll_send_to(cx, response, *addr) {
                Poll::Ready(Ok(bytes_sent)) if bytes_sent == response.len() => (),
                Poll::Ready(Ok(_)) => warn!("failed to send entire packet"),
                Poll::Ready(Err(err)) => warn!("error sending packet {:?}", err),
                Poll::Pending => break,
            }
            pinned.outgoing.pop_front();
        }

        Poll::Pending
    }
}

/// ICMP errors reported back on a UDP socket by an earlier send
fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionRefused
    )
}

/// Space separated hex bytes, for trace logs
struct HexDump<'a>(&'a [u8]);

impl<'a> fmt::Display for HexDump<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_family::Inet;
    use crate::dns_parser::{Header, RRData};
    use crate::store::FixedRecordStore;
    use std::net::{Ipv4Addr, Ipv6Addr};

    const EXAMPLE_QUERY: &[u8] = b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                                   \x07example\x03com\x00\x00\x01\x00\x01";

    fn store() -> Arc<dyn RecordStore> {
        FixedRecordStore::new(vec![
            ("example.com", StoreEntry::new("@", Type::A, "192.1.13.2")),
            ("example.com", StoreEntry::new("@", Type::AAAA, "2001:db8:0:0:0:0:0:1")),
            ("example.com", StoreEntry::mx("@", 10, "mail.example.com")),
            ("example.com", StoreEntry::new("www", Type::A, "192.1.13.3")),
            ("example.com", StoreEntry::new("mail", Type::A, "192.1.13.4")),
            ("example.com", StoreEntry::new("broken", Type::A, "192.1.13")),
        ])
    }

    fn query(id: u16, name: &str, qtype: u16) -> Vec<u8> {
        let request = Header {
            id,
            ..Header::default()
        };
        dns_parser::Builder::new_response(&request, flags::QUERY)
            .add_question(&Name::from_str(name), qtype, Class::IN.code())
            .unwrap()
            .build()
    }

    fn header(response: &[u8]) -> Header {
        Header::parse(response).unwrap()
    }

    #[test]
    fn answers_example_query() {
        let response = FSM::<Inet>::respond(&*store(), 3600, EXAMPLE_QUERY).unwrap();
        let expected: &[u8] = b"\x12\x34\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
            \x07example\x03com\x00\x00\x01\x00\x01\
            \x07example\x03com\x00\x00\x01\x00\x01\x00\x00\x0e\x10\
            \x00\x04\xc0\x01\x0d\x02";
        assert_eq!(&response[..], expected);
    }

    #[test]
    fn answers_subdomain() {
        let response = FSM::<Inet>::respond(&*store(), 60, &query(7, "www.example.com", 1)).unwrap();
        assert_eq!(header(&response).id, 7);
        assert_eq!(header(&response).answers, 1);
        assert!(response.ends_with(&[0, 4, 192, 1, 13, 3]));
    }

    #[test]
    fn answers_mx_and_aaaa() {
        let store = store();
        let response = FSM::<Inet>::respond(&*store, 60, &query(8, "example.com", 15)).unwrap();
        assert_eq!(header(&response).answers, 1);
        let mut rdata = vec![0x00, 0x0a];
        rdata.extend_from_slice(b"\x04mail\x07example\x03com\x00");
        assert!(response.ends_with(&rdata));

        let response = FSM::<Inet>::respond(&*store, 60, &query(9, "example.com", 28)).unwrap();
        assert_eq!(header(&response).answers, 1);
        let mut rdata = vec![0x00, 0x10];
        rdata.extend_from_slice(&Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1).octets());
        assert!(response.ends_with(&rdata));
    }

    #[test]
    fn any_returns_every_apex_record() {
        let response = FSM::<Inet>::respond(&*store(), 60, &query(10, "example.com", 255)).unwrap();
        assert_eq!(header(&response).answers, 3);
    }

    #[test]
    fn unknown_names_get_empty_answer() {
        for (name, qtype) in &[("nope.example.com", 1), ("example.net", 1), ("example.com", 99)] {
            let response = FSM::<Inet>::respond(&*store(), 60, &query(11, name, *qtype)).unwrap();
            let header = header(&response);
            assert_eq!(header.flags, flags::RESPONSE_NO_ERROR);
            assert_eq!(header.questions, 1);
            assert_eq!(header.answers, 0);
        }
    }

    #[test]
    fn malformed_requests_are_dropped() {
        assert_eq!(FSM::<Inet>::respond(&*store(), 60, &EXAMPLE_QUERY[..11]), None);
        assert_eq!(FSM::<Inet>::respond(&*store(), 60, &EXAMPLE_QUERY[..20]), None);
    }

    #[test]
    fn bad_stored_address_is_server_failure() {
        let response = FSM::<Inet>::respond(&*store(), 60, &query(12, "broken.example.com", 1)).unwrap();
        let header = header(&response);
        assert_eq!(header.flags, flags::RESPONSE_SERVER_FAILURE);
        assert_eq!(header.answers, 0);
        assert_eq!(header.questions, 1);
        assert_eq!(response.len(), 12 + 24);
    }

    #[derive(Debug)]
    struct FailingStore;

    impl RecordStore for FailingStore {
        fn lookup(&self, _apex: &str) -> io::Result<Vec<StoreEntry>> {
            Err(io::Error::new(io::ErrorKind::Other, "database is down"))
        }
    }

    #[test]
    fn store_failure_is_server_failure() {
        let response = FSM::<Inet>::respond(&FailingStore, 60, EXAMPLE_QUERY).unwrap();
        assert_eq!(header(&response).flags, flags::RESPONSE_SERVER_FAILURE);
    }

    #[test]
    fn entries_resolve_to_typed_data() {
        let entries = FSM::<Inet>::lookup(
            &*store(),
            &Question {
                qname: Name::from_str("mail.example.com"),
                qtype: Type::A.code(),
                qclass: Class::IN.code(),
            },
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rdata(), Ok(RRData::A(Ipv4Addr::new(192, 1, 13, 4))));
    }

    #[test]
    fn dotted_label_is_dropped() {
        let mut request = b"\x00\x2a\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00".to_vec();
        request.extend_from_slice(b"\x03a.b\x00\x00\x01\x00\x01");
        assert_eq!(FSM::<Inet>::respond(&*store(), 60, &request), None);

        let mut request = b"\x00\x2b\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00".to_vec();
        request.extend_from_slice(b"\x01.\x07example\x03com\x00\x00\x01\x00\x01");
        assert_eq!(FSM::<Inet>::respond(&*store(), 60, &request), None);
    }

    #[test]
    fn only_icmp_errors_are_retried() {
        let transient = [io::ErrorKind::ConnectionReset, io::ErrorKind::ConnectionRefused];
        for kind in transient.iter() {
            assert!(is_transient(&io::Error::new(*kind, "icmp")));
        }
        let fatal = [io::ErrorKind::PermissionDenied, io::ErrorKind::Other];
        for kind in fatal.iter() {
            assert!(!is_transient(&io::Error::new(*kind, "socket")));
        }
    }

    #[test]
    fn hex_dump() {
        assert_eq!(HexDump(&[0x12, 0x34, 0x0a]).to_string(), "12 34 0a");
        assert_eq!(HexDump(&[]).to_string(), "");
    }
}
