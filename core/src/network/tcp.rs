use std::io;

use async_trait::async_trait;
use sweep_common::network::target::Target;
use tokio::net::TcpStream;

use crate::probe::Dialer;

/// Full TCP handshake through the operating system's connect call.
///
/// Hostnames are resolved as part of the dial, so resolution time counts
/// against the probe's deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

#[async_trait]
impl Dialer for TcpDialer {
    async fn dial(&self, target: &Target) -> io::Result<()> {
        let stream = TcpStream::connect((target.address(), target.port())).await?;
        drop(stream);
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
