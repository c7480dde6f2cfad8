//! The DATA link abstraction used by the session.

use std::future::Future;

use super::error::TransportResult;
use crate::core::{ConnectionMode, FrameNumber, PowerLevel, Timeslot};

/// A link able to dispatch bursts in either dialect.
///
/// Optional parameters are passed through untouched; each implementation
/// owns the policy for filling them in when absent.
pub trait DataLink {
    /// Send a burst framed for a transceiver (`TRX` dialect).
    fn send_trx(
        &mut self,
        burst: &[u8],
        tn: Option<Timeslot>,
        fn_: FrameNumber,
        pwr: Option<PowerLevel>,
    ) -> impl Future<Output = TransportResult<()>>;

    /// Send a burst framed for a lower-layer stack (`L1` dialect).
    fn send_l1(
        &mut self,
        burst: &[u8],
        tn: Option<Timeslot>,
        fn_: FrameNumber,
        rssi: Option<PowerLevel>,
    ) -> impl Future<Output = TransportResult<()>>;

    /// Release the underlying sockets.
    ///
    /// MUST be idempotent: calling it again is a no-op.
    fn shutdown(&mut self);

    /// Send a burst using the primitive matching `mode`.
    fn send(
        &mut self,
        mode: ConnectionMode,
        burst: &[u8],
        tn: Option<Timeslot>,
        fn_: FrameNumber,
        level: Option<PowerLevel>,
    ) -> impl Future<Output = TransportResult<()>> {
        async move {
            match mode {
                ConnectionMode::Primary => self.send_trx(burst, tn, fn_, level).await,
                ConnectionMode::Secondary => self.send_l1(burst, tn, fn_, level).await,
            }
        }
    }
}
