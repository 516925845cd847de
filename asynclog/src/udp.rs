use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use crate::error::{LogError, Result};
use crate::format::LogRecord;

pub const DEFAULT_UDP_HOST: &str = "127.0.0.1";
pub const DEFAULT_UDP_PORT: u16 = 9990;

// ===== Адрес назначения =====

/// Сокет и адрес, куда зеркалируются записи.
#[derive(Debug)]
pub struct UdpTarget {
    socket: UdpSocket,
    addr: SocketAddr,
}

impl UdpTarget {
    /// Создаёт неблокирующий сокет на эфемерном порту того же семейства,
    /// что и адрес назначения.
    pub fn connect(ip: &str, port: u16) -> Result<Self> {
        let ip: IpAddr = ip.trim().parse().map_err(|e: std::net::AddrParseError| {
            LogError::Address {
                addr: format!("{}:{}", ip, port),
                reason: e.to_string(),
            }
        })?;
        let addr = SocketAddr::new(ip, port);

        let local = match ip {
            IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        let socket = UdpSocket::bind(local).map_err(LogError::Socket)?;
        socket.set_nonblocking(true).map_err(LogError::Socket)?;

        Ok(UdpTarget { socket, addr })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Одна датаграмма на запись, без рамок и подтверждений.
    pub fn send(&self, record: &LogRecord) -> io::Result<usize> {
        self.socket.send_to(record.as_bytes(), self.addr)
    }
}

// ===== Зеркало =====

/// Необязательное зеркало. Без адреса ничего не делает.
#[derive(Debug, Default)]
pub struct UdpSink {
    target: Option<UdpTarget>,
}

impl UdpSink {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Заменяет прежний адрес, старый сокет закрывается.
    pub fn install(&mut self, target: UdpTarget) {
        self.target = Some(target);
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    pub fn target_addr(&self) -> Option<SocketAddr> {
        self.target.as_ref().map(UdpTarget::addr)
    }

    /// `None`, если зеркало выключено. Ошибку отправки наружу не
    /// пробрасываем, только сообщаем вызывающему для статистики.
    pub fn send(&self, record: &LogRecord) -> Option<io::Result<usize>> {
        self.target.as_ref().map(|t| t.send(record))
    }

    pub fn close(&mut self) {
        self.target = None;
    }
}
