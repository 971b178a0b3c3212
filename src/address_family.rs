use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

pub enum Inet {}

pub enum Inet6 {}

pub trait AddressFamily {
    type Addr: Into<IpAddr> + Copy;

    const DOMAIN: Domain;

    fn configure(_socket: &Socket) -> io::Result<()> {
        Ok(())
    }

    fn udp_socket() -> io::Result<Socket> {
        Socket::new(Self::DOMAIN, Type::DGRAM, Some(Protocol::UDP))
    }

    fn bind(addr: Self::Addr, port: u16) -> io::Result<UdpSocket> {
        let addr: SockAddr = SocketAddr::new(addr.into(), port).into();
        let socket = Self::udp_socket()?;
        socket.set_reuse_address(true)?;
        socket.set_nonblocking(true)?;
        Self::configure(&socket)?;

        socket.bind(&addr)?;
        Ok(socket.into())
    }
}

impl AddressFamily for Inet {
    type Addr = Ipv4Addr;

    const DOMAIN: Domain = Domain::IPV4;
}

impl AddressFamily for Inet6 {
    type Addr = Ipv6Addr;

    const DOMAIN: Domain = Domain::IPV6;

    // keep `::` from also claiming the IPv4 port
    fn configure(socket: &Socket) -> io::Result<()> {
        socket.set_only_v6(true)
    }
}
