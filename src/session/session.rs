//! Burst transmission session.
//!
//! Sends `repeat_count` bursts, one per frame, starting from the configured
//! (or a random) frame number and wrapping at the end of the hyperframe.

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use super::config::SessionConfig;
use super::resolver::open_interface;
use crate::burst::RandomBurstGenerator;
use crate::core::{BurstSource, ConfigError, FrameNumber};
use crate::lifecycle::{Cancellation, Lifecycle};
use crate::transport::{DataLink, TransportError};

/// Errors that abort a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid configuration, nothing was sent.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A send failed; remaining bursts were skipped.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl SessionError {
    /// Process exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            SessionError::Config(_) => 2,
            SessionError::Transport(_) => 1,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All bursts were sent.
    Completed {
        /// Bursts sent.
        sent: u32,
    },
    /// An interrupt stopped the loop early.
    Interrupted {
        /// Bursts sent before the interrupt.
        sent: u32,
    },
}

impl RunOutcome {
    /// Bursts dispatched.
    pub fn sent(&self) -> u32 {
        match *self {
            RunOutcome::Completed { sent } | RunOutcome::Interrupted { sent } => sent,
        }
    }

    /// Process exit status; interruption is not a failure.
    pub fn exit_status(&self) -> u8 {
        0
    }
}

/// Run state of one transmission.
///
/// Owns the link for its whole lifetime and shuts it down exactly once,
/// whether the run completes, fails, is interrupted or the session is
/// dropped mid-flight.
pub struct TransmissionSession<'a, G: BurstSource, L: DataLink> {
    config: &'a SessionConfig,
    fn_: FrameNumber,
    remaining: u32,
    generator: G,
    link: L,
    released: bool,
}

impl<'a, G: BurstSource, L: DataLink> TransmissionSession<'a, G, L> {
    /// Create a session, drawing a random start frame if none is configured.
    pub fn new(config: &'a SessionConfig, generator: G, link: L) -> Self {
        Self::with_rng(config, generator, link, &mut rand::thread_rng())
    }

    /// Like [`new`](Self::new) with a caller-provided random source.
    pub fn with_rng<R: Rng + ?Sized>(
        config: &'a SessionConfig,
        generator: G,
        link: L,
        rng: &mut R,
    ) -> Self {
        let fn_ = config
            .frame_number()
            .unwrap_or_else(|| FrameNumber::random(rng));
        Self {
            config,
            fn_,
            remaining: config.repeat_count(),
            generator,
            link,
            released: false,
        }
    }

    /// Frame number of the next burst.
    pub fn frame_number(&self) -> FrameNumber {
        self.fn_
    }

    /// Bursts still to be sent.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Send all bursts, then release the link.
    ///
    /// `cancel` is checked before every burst; once set, no further burst
    /// is sent.
    pub async fn run(mut self, cancel: &Cancellation) -> Result<RunOutcome, SessionError> {
        let result = self.send_all(cancel).await;
        if let Err(SessionError::Transport(e)) = &result {
            warn!(remaining = self.remaining, fatal = e.is_fatal(), "aborting run: {e}");
        }
        self.release();
        result
    }

    async fn send_all(&mut self, cancel: &Cancellation) -> Result<RunOutcome, SessionError> {
        let config = self.config;
        let total = config.repeat_count();

        for index in 0..total {
            if cancel.is_cancelled() {
                info!(sent = index, total, "interrupted");
                return Ok(RunOutcome::Interrupted { sent: index });
            }

            let burst = self.generator.generate(config.kind());
            self.link
                .send(
                    config.mode(),
                    &burst,
                    config.timeslot(),
                    self.fn_,
                    config.power_level(),
                )
                .await?;

            info!(
                index = index + 1,
                total,
                kind = %config.kind(),
                frame = self.fn_.get(),
                mode = %config.mode(),
                "sent burst"
            );

            self.fn_ = self.fn_.next();
            self.remaining -= 1;
        }

        Ok(RunOutcome::Completed { sent: total })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.link.shutdown();
        }
    }
}

impl<G: BurstSource, L: DataLink> Drop for TransmissionSession<'_, G, L> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Open the interface for `config`, send its bursts and tear down.
///
/// An interrupt delivered while the interface is still being opened (for
/// example during a slow host name lookup) ends the run before anything is
/// sent. The lifecycle is marked finished once the run returns, so an
/// interrupt arriving afterwards does nothing.
pub async fn execute(
    config: &SessionConfig,
    lifecycle: &Lifecycle,
) -> Result<RunOutcome, SessionError> {
    let result = open_and_run(config, lifecycle).await;
    lifecycle.finish();
    result
}

async fn open_and_run(
    config: &SessionConfig,
    lifecycle: &Lifecycle,
) -> Result<RunOutcome, SessionError> {
    let generator = RandomBurstGenerator::new().training_sequence(config.training_sequence())?;
    let cancel = lifecycle.cancellation();
    let mut opening = lifecycle.cancellation();

    let link = tokio::select! {
        biased;
        () = opening.cancelled() => {
            info!(sent = 0, total = config.repeat_count(), "interrupted");
            return Ok(RunOutcome::Interrupted { sent: 0 });
        }
        link = open_interface(config) => link?,
    };

    TransmissionSession::new(config, generator, link)
        .run(&cancel)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        BurstKind, ConnectionMode, HYPERFRAME_LENGTH, PowerLevel, Timeslot,
    };
    use crate::session::testing::peer_on_free_base;
    use crate::transport::TransportResult;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Sent {
        mode: ConnectionMode,
        len: usize,
        tn: Option<Timeslot>,
        fn_: u32,
        level: Option<PowerLevel>,
    }

    /// In-memory link recording every call.
    #[derive(Default)]
    struct RecordingLink {
        sent: Vec<Sent>,
        shutdowns: u32,
        closes: u32,
        open: bool,
        fail_at: Option<usize>,
        interrupt_after: Option<(usize, Lifecycle)>,
    }

    impl RecordingLink {
        fn new() -> Self {
            Self {
                open: true,
                ..Default::default()
            }
        }

        fn record(
            &mut self,
            mode: ConnectionMode,
            burst: &[u8],
            tn: Option<Timeslot>,
            fn_: FrameNumber,
            level: Option<PowerLevel>,
        ) -> TransportResult<()> {
            if !self.open {
                return Err(TransportError::Closed);
            }
            if self.fail_at == Some(self.sent.len()) {
                return Err(TransportError::Io(std::io::Error::other("unreachable")));
            }
            self.sent.push(Sent {
                mode,
                len: burst.len(),
                tn,
                fn_: fn_.get(),
                level,
            });
            if let Some((after, lifecycle)) = &self.interrupt_after {
                if self.sent.len() == *after {
                    lifecycle.interrupt();
                }
            }
            Ok(())
        }
    }

    impl DataLink for &mut RecordingLink {
        async fn send_trx(
            &mut self,
            burst: &[u8],
            tn: Option<Timeslot>,
            fn_: FrameNumber,
            pwr: Option<PowerLevel>,
        ) -> TransportResult<()> {
            self.record(ConnectionMode::Primary, burst, tn, fn_, pwr)
        }

        async fn send_l1(
            &mut self,
            burst: &[u8],
            tn: Option<Timeslot>,
            fn_: FrameNumber,
            rssi: Option<PowerLevel>,
        ) -> TransportResult<()> {
            self.record(ConnectionMode::Secondary, burst, tn, fn_, rssi)
        }

        fn shutdown(&mut self) {
            self.shutdowns += 1;
            if self.open {
                self.open = false;
                self.closes += 1;
            }
        }
    }

    fn config(kind: BurstKind, count: u32, start: Option<u32>) -> SessionConfig {
        SessionConfig::builder(kind)
            .repeat_count(count)
            .frame_number(start.map(|fn_| FrameNumber::new(fn_).unwrap()))
            .build()
            .unwrap()
    }

    fn frames(link: &RecordingLink) -> Vec<u32> {
        link.sent.iter().map(|s| s.fn_).collect()
    }

    #[tokio::test]
    async fn test_sends_consecutive_frames() {
        let config = config(BurstKind::Normal, 5, Some(100));
        let mut link = RecordingLink::new();

        let outcome = TransmissionSession::new(&config, RandomBurstGenerator::from_seed(1), &mut link)
            .run(&Cancellation::never())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Completed { sent: 5 });
        assert_eq!(frames(&link), vec![100, 101, 102, 103, 104]);
        assert_eq!(link.shutdowns, 1);
    }

    #[tokio::test]
    async fn test_frame_number_wraps() {
        let config = config(BurstKind::Access, 3, Some(HYPERFRAME_LENGTH - 2));
        let mut link = RecordingLink::new();

        TransmissionSession::new(&config, RandomBurstGenerator::from_seed(2), &mut link)
            .run(&Cancellation::never())
            .await
            .unwrap();

        assert_eq!(
            frames(&link),
            vec![HYPERFRAME_LENGTH - 2, HYPERFRAME_LENGTH - 1, 0]
        );
    }

    #[tokio::test]
    async fn test_random_start_frame() {
        let config = config(BurstKind::Synchronization, 4, None);
        let mut link = RecordingLink::new();
        let mut rng = StdRng::seed_from_u64(11);

        let session = TransmissionSession::with_rng(
            &config,
            RandomBurstGenerator::from_seed(3),
            &mut link,
            &mut rng,
        );
        let start = session.frame_number().get();
        assert_eq!(session.remaining(), 4);
        session.run(&Cancellation::never()).await.unwrap();

        assert!(start < HYPERFRAME_LENGTH);
        let expected: Vec<u32> = (0..4).map(|i| (start + i) % HYPERFRAME_LENGTH).collect();
        assert_eq!(frames(&link), expected);
    }

    #[tokio::test]
    async fn test_optional_parameters_passed_through() {
        let mut link = RecordingLink::new();
        let absent = config(BurstKind::Normal, 1, Some(0));
        TransmissionSession::new(&absent, RandomBurstGenerator::from_seed(4), &mut link)
            .run(&Cancellation::never())
            .await
            .unwrap();

        let present = SessionConfig::builder(BurstKind::FrequencyCorrection)
            .mode(ConnectionMode::Secondary)
            .frame_number(Some(FrameNumber::ZERO))
            .timeslot(Some(Timeslot(6)))
            .power_level(Some(PowerLevel::from_signed(-5).unwrap()))
            .build()
            .unwrap();
        let mut other = RecordingLink::new();
        TransmissionSession::new(&present, RandomBurstGenerator::from_seed(5), &mut other)
            .run(&Cancellation::never())
            .await
            .unwrap();

        assert_eq!(link.sent.len(), 1);
        assert_eq!(other.sent.len(), 1);
        assert_eq!(
            link.sent[0],
            Sent {
                mode: ConnectionMode::Primary,
                len: 148,
                tn: None,
                fn_: 0,
                level: None,
            }
        );
        assert_eq!(
            other.sent[0],
            Sent {
                mode: ConnectionMode::Secondary,
                len: 148,
                tn: Some(Timeslot(6)),
                fn_: 0,
                level: Some(PowerLevel::new(5)),
            }
        );
    }

    #[tokio::test]
    async fn test_interrupt_mid_loop() {
        let config = config(BurstKind::Normal, 10, Some(0));
        let lifecycle = Lifecycle::new();
        let mut link = RecordingLink::new();
        link.interrupt_after = Some((3, lifecycle.clone()));

        let outcome = TransmissionSession::new(&config, RandomBurstGenerator::from_seed(6), &mut link)
            .run(&lifecycle.cancellation())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Interrupted { sent: 3 });
        assert_eq!(outcome.exit_status(), 0);
        assert_eq!(frames(&link), vec![0, 1, 2]);
        assert_eq!(link.shutdowns, 1);
        assert_eq!(link.closes, 1);

        // a second interrupt finds the lifecycle already terminated
        assert!(!lifecycle.interrupt());
        assert_eq!(link.shutdowns, 1);
    }

    #[tokio::test]
    async fn test_interrupt_before_start() {
        let config = config(BurstKind::Normal, 3, Some(0));
        let lifecycle = Lifecycle::new();
        lifecycle.interrupt();
        let mut link = RecordingLink::new();

        let outcome = TransmissionSession::new(&config, RandomBurstGenerator::from_seed(7), &mut link)
            .run(&lifecycle.cancellation())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Interrupted { sent: 0 });
        assert!(link.sent.is_empty());
        assert_eq!(link.shutdowns, 1);
    }

    #[tokio::test]
    async fn test_transport_error_aborts_and_releases() {
        let config = config(BurstKind::Normal, 5, Some(7));
        let mut link = RecordingLink::new();
        link.fail_at = Some(2);

        let err = TransmissionSession::new(&config, RandomBurstGenerator::from_seed(8), &mut link)
            .run(&Cancellation::never())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Transport(TransportError::Io(_))));
        assert_eq!(err.exit_status(), 1);
        assert_eq!(frames(&link), vec![7, 8]);
        assert_eq!(link.shutdowns, 1);
    }

    #[tokio::test]
    async fn test_dropped_session_releases_once() {
        let config = config(BurstKind::Normal, 1, Some(0));
        let mut link = RecordingLink::new();

        drop(TransmissionSession::new(
            &config,
            RandomBurstGenerator::from_seed(9),
            &mut link,
        ));

        assert!(link.sent.is_empty());
        assert_eq!(link.shutdowns, 1);
    }

    #[test]
    fn test_config_error_exit_status() {
        let err = SessionError::from(ConfigError::UnknownBurstKind("ZZ".into()));
        assert_eq!(err.exit_status(), 2);
    }

    #[tokio::test]
    async fn test_execute_against_udp_peer() {
        let (peer, base_port) = peer_on_free_base().await;
        let config = SessionConfig::builder(BurstKind::Normal)
            .base_port(base_port)
            .repeat_count(3)
            .frame_number(Some(FrameNumber::new(HYPERFRAME_LENGTH - 1).unwrap()))
            .timeslot(Some(Timeslot(1)))
            .power_level(Some(PowerLevel::new(10)))
            .build()
            .unwrap();
        let lifecycle = Lifecycle::new();

        let outcome = execute(&config, &lifecycle).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { sent: 3 });
        assert!(!lifecycle.interrupt());

        let mut buf = [0u8; 512];
        let mut fns = Vec::new();
        for _ in 0..3 {
            let (len, _) = peer.recv_from(&mut buf).await.unwrap();
            assert_eq!(len, 6 + 148);
            assert_eq!(buf[0], 1);
            assert_eq!(buf[5], 10);
            fns.push(u32::from_be_bytes([buf[1], buf[2], buf[3], buf[4]]));
        }
        assert_eq!(fns, vec![HYPERFRAME_LENGTH - 1, 0, 1]);
    }

    #[tokio::test]
    async fn test_execute_without_listener_sends_everything() {
        let (peer, base_port) = peer_on_free_base().await;
        drop(peer);
        let config = SessionConfig::builder(BurstKind::Normal)
            .base_port(base_port)
            .repeat_count(20)
            .build()
            .unwrap();

        let outcome = execute(&config, &Lifecycle::new()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed { sent: 20 });
    }

    #[tokio::test]
    async fn test_execute_interrupted_before_open() {
        let config = SessionConfig::builder(BurstKind::Normal)
            .remote_addr("unresolvable.invalid")
            .repeat_count(5)
            .build()
            .unwrap();
        let lifecycle = Lifecycle::new();
        lifecycle.interrupt();

        let outcome = execute(&config, &lifecycle).await.unwrap();
        assert_eq!(outcome, RunOutcome::Interrupted { sent: 0 });
    }
}
