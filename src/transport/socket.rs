//! UDP DATA interface.
//!
//! Owns the socket pair role of a TRX DATA connection: bound locally to the
//! receive port, sending datagrams to the peer's send port. The socket is
//! left unconnected so that ICMP errors from a silent or crashed peer never
//! surface as send failures.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::net::{UdpSocket, lookup_host};
use tracing::debug;

use super::envelope::DataMessage;
use super::error::{TransportError, TransportResult};
use super::link::DataLink;
use crate::core::{
    ConnectionMode, DEFAULT_RSSI_RANGE, FrameNumber, MAX_BURST_PAYLOAD, MAX_DEFAULT_TX_POWER,
    PowerLevel, TIMESLOTS_PER_FRAME, Timeslot,
};

/// DATA interface towards a transceiver or L1 peer.
///
/// Absent timeslots are drawn from `0..8`, absent TRX power from `0..=34`
/// and absent RSSI from `50..=75`.
#[derive(Debug)]
pub struct DataInterface {
    /// The socket, `None` once shut down.
    socket: Option<UdpSocket>,
    /// Peer address datagrams are sent to.
    remote_addr: SocketAddr,
    /// Local address after binding.
    local_addr: SocketAddr,
    /// Source for parameter defaults.
    rng: StdRng,
}

impl DataInterface {
    /// Open an interface sending to `remote_addr:send_port` from local
    /// port `receive_port`.
    ///
    /// `remote_addr` may be a host name. A `receive_port` of zero lets the
    /// OS pick an ephemeral port.
    pub async fn open(
        remote_addr: &str,
        send_port: u16,
        receive_port: u16,
    ) -> TransportResult<Self> {
        let remote_addr = lookup_host((remote_addr, send_port))
            .await
            .map_err(|e| TransportError::AddressResolution(format!("{remote_addr}: {e}")))?
            .next()
            .ok_or_else(|| TransportError::AddressResolution(remote_addr.to_string()))?;

        let unspecified = match remote_addr.ip() {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };
        let socket = UdpSocket::bind(SocketAddr::new(unspecified, receive_port)).await?;
        let local_addr = socket.local_addr()?;

        debug!(%local_addr, %remote_addr, "DATA interface open");

        Ok(Self {
            socket: Some(socket),
            remote_addr,
            local_addr,
            rng: StdRng::from_entropy(),
        })
    }

    /// Peer address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Local address.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Check whether the socket is still held.
    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    fn default_timeslot(&mut self) -> Timeslot {
        Timeslot(self.rng.gen_range(0..TIMESLOTS_PER_FRAME))
    }

    async fn dispatch(&mut self, msg: DataMessage<'_>) -> TransportResult<()> {
        if msg.burst.len() > MAX_BURST_PAYLOAD {
            return Err(TransportError::PayloadTooLarge(msg.burst.len()));
        }
        let socket = self.socket.as_ref().ok_or(TransportError::Closed)?;
        let datagram = msg.encode();
        socket.send_to(&datagram, self.remote_addr).await?;
        debug!(len = datagram.len(), mode = %msg.mode, "datagram sent");
        Ok(())
    }

    /// Send a burst to a transceiver.
    pub async fn send_trx_msg(
        &mut self,
        burst: &[u8],
        tn: Option<Timeslot>,
        fn_: FrameNumber,
        pwr: Option<PowerLevel>,
    ) -> TransportResult<()> {
        let tn = match tn {
            Some(tn) => tn,
            None => self.default_timeslot(),
        };
        let level =
            pwr.unwrap_or_else(|| PowerLevel::new(self.rng.gen_range(0..=MAX_DEFAULT_TX_POWER)));

        self.dispatch(DataMessage {
            mode: ConnectionMode::Primary,
            tn,
            fn_,
            level,
            burst,
        })
        .await
    }

    /// Send a burst to an L1 peer.
    pub async fn send_l1_msg(
        &mut self,
        burst: &[u8],
        tn: Option<Timeslot>,
        fn_: FrameNumber,
        rssi: Option<PowerLevel>,
    ) -> TransportResult<()> {
        let tn = match tn {
            Some(tn) => tn,
            None => self.default_timeslot(),
        };
        let level = rssi.unwrap_or_else(|| PowerLevel::new(self.rng.gen_range(DEFAULT_RSSI_RANGE)));

        self.dispatch(DataMessage {
            mode: ConnectionMode::Secondary,
            tn,
            fn_,
            level,
            burst,
        })
        .await
    }

    /// Close the socket. Subsequent calls do nothing.
    pub fn shutdown(&mut self) {
        if let Some(socket) = self.socket.take() {
            debug!(local_addr = %self.local_addr, "DATA interface closed");
            drop(socket);
        }
    }
}

impl DataLink for DataInterface {
    async fn send_trx(
        &mut self,
        burst: &[u8],
        tn: Option<Timeslot>,
        fn_: FrameNumber,
        pwr: Option<PowerLevel>,
    ) -> TransportResult<()> {
        self.send_trx_msg(burst, tn, fn_, pwr).await
    }

    async fn send_l1(
        &mut self,
        burst: &[u8],
        tn: Option<Timeslot>,
        fn_: FrameNumber,
        rssi: Option<PowerLevel>,
    ) -> TransportResult<()> {
        self.send_l1_msg(burst, tn, fn_, rssi).await
    }

    fn shutdown(&mut self) {
        DataInterface::shutdown(self);
    }
}

impl Drop for DataInterface {
    fn drop(&mut self) {
        self.shutdown();
    }
}
