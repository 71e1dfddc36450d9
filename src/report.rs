//! Human-readable progress and result output.
//!
//! The report goes to stdout; diagnostics go through `tracing` to stderr.

use std::io::{self, Write};

use crate::bridge::types::{FeeQuote, PreparedTransfer, TransferResult};
use crate::config::schema::{DESTINATION_CHAIN, SOURCE_CHAIN};

/// Receives workflow milestones.
pub trait Reporter {
    fn fee_quote(&mut self, quote: &FeeQuote) -> io::Result<()>;

    fn submitting(&mut self, transfer: &PreparedTransfer) -> io::Result<()>;

    fn submitted(&mut self, result: &TransferResult) -> io::Result<()>;
}

/// Plain-text reporter over any writer.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn fee_quote(&mut self, quote: &FeeQuote) -> io::Result<()> {
        writeln!(
            self.out,
            "Estimated fees: token_fee={} native_fee={}",
            quote.token_fee, quote.native_fee
        )
    }

    fn submitting(&mut self, transfer: &PreparedTransfer) -> io::Result<()> {
        writeln!(
            self.out,
            "Sending bridge transaction on {}: amount={} to {}",
            SOURCE_CHAIN, transfer.amount, transfer.recipient
        )
    }

    fn submitted(&mut self, result: &TransferResult) -> io::Result<()> {
        writeln!(self.out, "Bridge tx sent: 0x{:x}", result.transaction_hash)?;
        writeln!(self.out, "Relayer nonce: {}", result.relayer_nonce)?;
        writeln!(
            self.out,
            "Tokens are in flight; the relayer finalizes on {} asynchronously.",
            DESTINATION_CHAIN
        )?;
        self.out.flush()
    }
}
