use apexdns::dns_parser::Type;
use apexdns::{FixedRecordStore, Responder, ResponderConfig, StoreEntry};

pub fn main() {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters("apexdns=debug");
    builder.init();

    // port from the first argument, so the server can run unprivileged
    let port = match std::env::args().nth(1) {
        Some(port) => port.parse().expect("port must be a number"),
        None => 8053,
    };

    let store = FixedRecordStore::new(vec![
        ("example.com", StoreEntry::new("@", Type::A, "192.1.13.2")),
        ("example.com", StoreEntry::new("@", Type::AAAA, "2001:db8:0:0:0:0:0:1")),
        ("example.com", StoreEntry::mx("@", 10, "mail.example.com")),
        ("example.com", StoreEntry::new("mail", Type::A, "192.1.13.3")),
        ("example.com", StoreEntry::new("www", Type::CNAME, "example.com")),
    ]);

    let config = ResponderConfig {
        port,
        ..ResponderConfig::default()
    };
    let responder = Responder::new(config, store).unwrap();
    for addr in responder.local_addrs() {
        log::info!("listening on {}", addr);
    }

    loop {
        ::std::thread::sleep(::std::time::Duration::from_secs(10));
    }
}
