//! Loopback fixtures shared by the session tests.

use tokio::net::UdpSocket;

use crate::core::{L1_DATA_PORT_OFFSET, TRX_DATA_PORT_OFFSET};

/// Bind a peer on `base + 2` for a base whose `base + 102` is free.
///
/// Returns the peer socket and the base port.
pub(crate) async fn peer_on_free_base() -> (UdpSocket, u16) {
    for _ in 0..64 {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = peer.local_addr().unwrap().port();
        let Some(base) = port.checked_sub(TRX_DATA_PORT_OFFSET) else {
            continue;
        };
        let Some(receive_port) = base.checked_add(L1_DATA_PORT_OFFSET) else {
            continue;
        };
        if UdpSocket::bind(("0.0.0.0", receive_port)).await.is_ok() {
            return (peer, base);
        }
    }
    panic!("no free loopback port pair");
}
