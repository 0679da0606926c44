//! Device session establishment and the live device handle
//!
//! A [`Device`] is created once at process startup, after the reachability
//! probe confirms the panel answers, and is shared read-only from then on.
//! The handle owns the two critical sections of the crate: the framebuffer
//! lock (mutation plus push must not interleave) and the wire lock (an
//! animation's reset-then-frames sequence must not interleave with another
//! stream or with a push). Lock order is always framebuffer before wire.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::animation;
use crate::framebuffer::Framebuffer;
use crate::transport::{self, HttpTransport, ProbeOutcome, Transport};
use crate::types::{Command, GridSize, Setting, TextBanner};
use crate::{PanelError, Result};

/// Immutable identity of a connected device.
#[derive(Debug, Clone)]
pub struct DeviceSession {
    address: String,
    size: GridSize,
}

impl DeviceSession {
    pub fn new(address: impl Into<String>, size: GridSize) -> Self {
        Self { address: address.into(), size }
    }

    /// Hostname or IP the device answers on.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Native grid size of the panel.
    pub fn size(&self) -> GridSize {
        self.size
    }
}

/// Live handle to a reachable device.
pub struct Device {
    session: DeviceSession,
    transport: Arc<dyn Transport>,
    framebuffer: Mutex<Framebuffer>,
    /// Serializes multi-command wire sequences; held across a whole
    /// animation stream so concurrent streams queue instead of corrupting
    /// device playback.
    wire: Mutex<()>,
}

impl Device {
    /// Probe the device and construct a handle.
    ///
    /// Performs up to `max_retries + 1` probe attempts with a bounded
    /// per-attempt timeout, logging each outcome. Exhausting the budget
    /// returns [`PanelError::Unreachable`], which the embedding process is
    /// expected to treat as fatal. Pass `u32::MAX` to retry effectively
    /// forever. Probing never mutates device state.
    pub async fn open(address: &str, size: GridSize, max_retries: u32) -> Result<Self> {
        info!(address, size = size.pixels(), "Connecting to panel");

        probe_until_reachable(address, max_retries, || transport::probe(address)).await?;

        let transport = Arc::new(HttpTransport::new(address)?);
        info!(address, "Panel session established");

        Ok(Self::with_transport(DeviceSession::new(address, size), transport))
    }

    /// Construct a handle over an explicit transport.
    ///
    /// Skips probing; intended for tests and callers with custom wiring.
    pub fn with_transport(session: DeviceSession, transport: Arc<dyn Transport>) -> Self {
        let framebuffer = Mutex::new(Framebuffer::new(session.size));
        Self { session, transport, framebuffer, wire: Mutex::new(()) }
    }

    /// Session identity; read-only after startup.
    pub fn session(&self) -> &DeviceSession {
        &self.session
    }

    /// Exclusive access to the local framebuffer mirror.
    ///
    /// Drawing primitives mutate only the mirror; nothing reaches the
    /// device until [`Device::push`].
    pub async fn framebuffer(&self) -> MutexGuard<'_, Framebuffer> {
        self.framebuffer.lock().await
    }

    /// Serialize the framebuffer and send it as a static frame.
    ///
    /// The grid is not cleared: the device retains the frame and the
    /// mirror keeps accumulating on top of it.
    pub async fn push(&self) -> Result<()> {
        let framebuffer = self.framebuffer.lock().await;
        let command = framebuffer.to_command();
        let _wire = self.wire.lock().await;
        self.transport.send(&command).await?;
        Ok(())
    }

    /// Decode image bytes and play them on the device.
    ///
    /// Multi-frame GIFs stream as an animation (reset first, frames in
    /// order, capped at the protocol limit); anything else becomes one
    /// static frame. The wire lock is held for the whole sequence, so a
    /// concurrent stream or push queues behind this one.
    pub async fn play_animation(&self, bytes: &[u8], speed: u32, skip_first: bool) -> Result<()> {
        let _wire = self.wire.lock().await;
        animation::stream(self.transport.as_ref(), self.session.size, bytes, speed, skip_first)
            .await
    }

    /// Fetch an image or GIF from a URL and play it.
    pub async fn play_animation_url(&self, url: &str, speed: u32, skip_first: bool) -> Result<()> {
        let bytes = transport::fetch_bytes(url).await?;
        self.play_animation(&bytes, speed, skip_first).await
    }

    /// Apply a one-parameter device setting.
    pub async fn apply(&self, setting: Setting) -> Result<()> {
        let _wire = self.wire.lock().await;
        self.transport.send(&Command::Setting(setting)).await?;
        Ok(())
    }

    /// Show a device-rendered scrolling text overlay.
    pub async fn send_text(&self, banner: TextBanner) -> Result<()> {
        let _wire = self.wire.lock().await;
        self.transport.send(&Command::ScrollingText(banner)).await?;
        Ok(())
    }
}

/// Run the bounded startup probe loop.
///
/// Generic over the probe future so attempt accounting is testable without
/// a network. Outcomes are logged per attempt in their four distinct
/// categories; only the final exhaustion is raised as an error.
pub(crate) async fn probe_until_reachable<F, Fut>(
    address: &str,
    max_retries: u32,
    mut probe: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProbeOutcome>,
{
    let total_attempts = max_retries.saturating_add(1);

    for attempt in 1..=total_attempts {
        match probe().await {
            ProbeOutcome::Reachable => {
                info!(address, attempt, "Panel reachable");
                return Ok(());
            }
            ProbeOutcome::Timeout => {
                warn!(address, attempt, total_attempts, "Probe timed out");
            }
            ProbeOutcome::TransportError(error) => {
                warn!(address, attempt, total_attempts, error, "Probe transport error");
            }
            ProbeOutcome::Unexpected(error) => {
                warn!(address, attempt, total_attempts, error, "Probe failed unexpectedly");
            }
        }
    }

    Err(PanelError::Unreachable { address: address.to_string(), attempts: total_attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use crate::types::Color;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn probe_exhaustion_counts_initial_plus_retries() {
        let attempts = AtomicU32::new(0);
        let result = probe_until_reachable("panel.local", 2, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { ProbeOutcome::Timeout }
        })
        .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        match result {
            Err(PanelError::Unreachable { address, attempts }) => {
                assert_eq!(address, "panel.local");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected Unreachable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn probe_success_short_circuits() {
        let attempts = AtomicU32::new(0);
        probe_until_reachable("panel.local", 10, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { ProbeOutcome::Reachable }
        })
        .await
        .unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn probe_recovers_within_budget() {
        let attempts = AtomicU32::new(0);
        probe_until_reachable("panel.local", 5, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    ProbeOutcome::TransportError("connection refused".into())
                } else {
                    ProbeOutcome::Reachable
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn push_sends_the_full_grid_and_keeps_it() {
        let mock = Arc::new(MockTransport::new());
        let device =
            Device::with_transport(DeviceSession::new("panel.local", GridSize::Size16), mock.clone());

        device.framebuffer().await.set_pixel(1, 1, Color::WHITE);
        device.push().await.unwrap();
        device.push().await.unwrap();

        let commands = mock.commands();
        assert_eq!(commands.len(), 2);
        // Both pushes carry the same retained grid.
        assert_eq!(commands[0], commands[1]);
        match &commands[0] {
            Command::DrawStatic { dimension, data } => {
                assert_eq!(*dimension, 16);
                let offset = (16 + 1) * 3;
                assert_eq!(&data[offset..offset + 3], &[255, 255, 255]);
            }
            other => panic!("expected DrawStatic, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn settings_go_straight_to_the_wire() {
        let mock = Arc::new(MockTransport::new());
        let device =
            Device::with_transport(DeviceSession::new("panel.local", GridSize::Size64), mock.clone());

        device.apply(Setting::Brightness(50)).await.unwrap();
        assert_eq!(mock.commands(), vec![Command::Setting(Setting::Brightness(50))]);
    }
}
