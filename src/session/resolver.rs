//! Connection resolver.
//!
//! Both dialects share the ports `base + 2` and `base + 102`; the dialect
//! only decides which one we send to.

use super::config::SessionConfig;
use super::session::SessionError;
use crate::core::{ConfigError, ConnectionMode, L1_DATA_PORT_OFFSET, TRX_DATA_PORT_OFFSET};
use crate::transport::DataInterface;

/// UDP ports of one DATA connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortPair {
    /// Peer port datagrams are sent to.
    pub send_port: u16,
    /// Local port bound for the reverse direction.
    pub receive_port: u16,
}

impl PortPair {
    /// Map a base port and dialect onto the send and receive ports.
    pub fn resolve(base_port: u16, mode: ConnectionMode) -> Result<Self, ConfigError> {
        let trx_port = base_port
            .checked_add(TRX_DATA_PORT_OFFSET)
            .ok_or(ConfigError::BasePortOutOfRange(base_port))?;
        let l1_port = base_port
            .checked_add(L1_DATA_PORT_OFFSET)
            .ok_or(ConfigError::BasePortOutOfRange(base_port))?;

        Ok(match mode {
            ConnectionMode::Primary => Self {
                send_port: trx_port,
                receive_port: l1_port,
            },
            ConnectionMode::Secondary => Self {
                send_port: l1_port,
                receive_port: trx_port,
            },
        })
    }
}

/// Open the DATA interface described by `config`.
pub async fn open_interface(config: &SessionConfig) -> Result<DataInterface, SessionError> {
    let ports = PortPair::resolve(config.base_port(), config.mode())?;
    let iface = DataInterface::open(config.remote_addr(), ports.send_port, ports.receive_port)
        .await?;
    Ok(iface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BurstKind;
    use crate::session::testing::peer_on_free_base;
    use crate::transport::TransportError;
    use std::io::ErrorKind;
    use tokio::net::UdpSocket;

    #[test]
    fn test_primary_ports() {
        let ports = PortPair::resolve(5700, ConnectionMode::Primary).unwrap();
        assert_eq!(ports.send_port, 5702);
        assert_eq!(ports.receive_port, 5802);
    }

    #[test]
    fn test_secondary_ports() {
        let ports = PortPair::resolve(5700, ConnectionMode::Secondary).unwrap();
        assert_eq!(ports.send_port, 5802);
        assert_eq!(ports.receive_port, 5702);
    }

    #[test]
    fn test_roles_swapped() {
        let primary = PortPair::resolve(6000, ConnectionMode::Primary).unwrap();
        let secondary = PortPair::resolve(6000, ConnectionMode::Secondary).unwrap();
        assert_eq!(primary.send_port, secondary.receive_port);
        assert_eq!(primary.receive_port, secondary.send_port);
    }

    #[test]
    fn test_port_overflow() {
        assert_eq!(
            PortPair::resolve(u16::MAX - 50, ConnectionMode::Primary),
            Err(ConfigError::BasePortOutOfRange(u16::MAX - 50))
        );
    }

    #[tokio::test]
    async fn test_open_interface_targets_send_port() {
        let (_peer, base_port) = peer_on_free_base().await;
        let config = SessionConfig::builder(BurstKind::Normal)
            .base_port(base_port)
            .build()
            .unwrap();

        let iface = open_interface(&config).await.unwrap();
        assert_eq!(iface.remote_addr().port(), base_port + 2);
        assert_eq!(iface.local_addr().port(), base_port + 102);
    }

    #[tokio::test]
    async fn test_open_interface_receive_port_taken() {
        let (_peer, base_port) = peer_on_free_base().await;
        let _taken = UdpSocket::bind(("0.0.0.0", base_port + 102)).await.unwrap();
        let config = SessionConfig::builder(BurstKind::Normal)
            .base_port(base_port)
            .build()
            .unwrap();

        let err = open_interface(&config).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Transport(TransportError::Io(ref e)) if e.kind() == ErrorKind::AddrInUse
        ));
    }
}
