use apexdns::dns_parser::{flags, Header, Packet, Type};
use apexdns::{FixedRecordStore, Responder, ResponderConfig, StoreEntry};
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

const EXAMPLE_QUERY: &[u8] = b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                               \x07example\x03com\x00\x00\x01\x00\x01";

fn responder() -> (Responder, SocketAddr) {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = FixedRecordStore::new(vec![
        ("example.com", StoreEntry::new("@", Type::A, "192.1.13.2")),
        ("example.com", StoreEntry::mx("@", 10, "mail.example.com")),
    ]);
    let responder = Responder::new(ResponderConfig::localhost(), store).unwrap();
    let addr = responder.local_addrs()[0];
    (responder, addr)
}

fn client(timeout: Duration) -> UdpSocket {
    let sock = UdpSocket::bind("127.0.0.1:0").unwrap();
    sock.set_read_timeout(Some(timeout)).unwrap();
    sock
}

#[test]
fn answers_over_udp() {
    let (_responder, addr) = responder();
    let sock = client(Duration::from_secs(5));
    sock.send_to(EXAMPLE_QUERY, addr).unwrap();

    let mut buf = [0u8; 512];
    let (len, from) = sock.recv_from(&mut buf).unwrap();
    assert_eq!(from, addr);
    let response = &buf[..len];

    let header = Header::parse(response).unwrap();
    assert_eq!(header.id, 0x1234);
    assert_eq!(header.flags, flags::RESPONSE_NO_ERROR);
    assert_eq!(header.questions, 1);
    assert_eq!(header.answers, 1);
    assert!(response.ends_with(&[0x00, 0x04, 192, 1, 13, 2]));

    // the echoed question section reads back like a request
    let echoed = Packet::parse(response);
    assert!(echoed.is_complete());
    assert_eq!(echoed.questions[0].qname.as_str(), "example.com");
}

#[test]
fn drops_truncated_datagrams() {
    let (_responder, addr) = responder();
    let sock = client(Duration::from_millis(300));
    sock.send_to(&EXAMPLE_QUERY[..11], addr).unwrap();
    sock.send_to(&EXAMPLE_QUERY[..EXAMPLE_QUERY.len() - 1], addr)
        .unwrap();

    let mut buf = [0u8; 512];
    assert!(sock.recv_from(&mut buf).is_err());

    // the server is still serving afterwards
    sock.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    sock.send_to(EXAMPLE_QUERY, addr).unwrap();
    let (len, _) = sock.recv_from(&mut buf).unwrap();
    assert_eq!(Header::parse(&buf[..len]).unwrap().id, 0x1234);
}

#[test]
fn stops_on_drop() {
    let (responder, addr) = responder();
    drop(responder);

    let sock = client(Duration::from_millis(300));
    sock.send_to(EXAMPLE_QUERY, addr).unwrap();
    let mut buf = [0u8; 512];
    assert!(sock.recv_from(&mut buf).is_err());
}
