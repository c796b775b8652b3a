//! `segsim run` — tick the controller and trace its pins.
//!
//! Register writes are applied between ticks, the way a bus master lands a
//! CSR write between two clock edges of the display domain.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use segment_display::{ControllerConfig, DisplayOutputs, TripleDigitController, ValueRegister};
use serde::Serialize;

use crate::parse::ScheduledWrite;

/// Name the register is exposed under on the configuration bus.
const REGISTER_NAME: &str = "seven_seg_ctrl_value";

/// Trace output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    Text,
    /// One JSON object per line
    Json,
}

/// Everything `segsim run` needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: ControllerConfig,
    pub ticks: u64,
    pub value: u32,
    pub writes: Vec<ScheduledWrite>,
    pub format: OutputFormat,
    pub all: bool,
}

/// One traced cycle.
#[derive(Debug, Serialize)]
struct Record {
    cycle: u64,
    value: u32,
    digit_select: u8,
    nibble: u8,
    segments: String,
}

/// Build the controller configuration from the CLI timing flags.
pub fn build_config(
    clock_hz: f64,
    period_ns: Option<f64>,
    refresh_ns: u64,
) -> Result<ControllerConfig> {
    let config = match period_ns {
        Some(period_ns) => ControllerConfig::new(period_ns),
        None => ControllerConfig::from_clock_hz(clock_hz)?,
    }
    .with_refresh_interval_ns(refresh_ns);
    config.validate().context("invalid controller timing")?;
    Ok(config)
}

/// Run the simulation, writing the trace to `out`.
pub fn run(options: &RunOptions, out: &mut impl Write) -> Result<()> {
    let register = ValueRegister::<3>::new(REGISTER_NAME);
    register.write(options.value);
    let mut ctrl = TripleDigitController::new(&options.config, &register)?;
    tracing::info!(
        clock_period_ns = options.config.clock_period_ns,
        refresh_count = ctrl.refresh_count(),
        ticks = options.ticks,
        "simulation start"
    );

    let mut writes = options.writes.clone();
    writes.sort_by_key(|w| w.tick);
    let mut pending = writes.into_iter().peekable();

    if options.format == OutputFormat::Text {
        writeln!(out, "{:>12}  {:>5}  dig  seg      n", "cycle", "value")?;
    }

    let mut last: Option<DisplayOutputs> = None;
    let mut advances: u64 = 0;
    loop {
        while let Some(write) = pending.next_if(|w| w.tick <= ctrl.cycle()) {
            tracing::debug!(cycle = ctrl.cycle(), value = write.value, "scheduled write");
            register.write(write.value);
        }

        let outputs = ctrl.outputs();
        if options.all || last != Some(outputs) {
            emit(&ctrl, outputs, options.format, out)?;
        }
        last = Some(outputs);

        if ctrl.cycle() >= options.ticks {
            break;
        }
        if ctrl.tick() {
            advances = advances.saturating_add(1);
        }
    }

    tracing::info!(ticks = ctrl.cycle(), advances, "simulation done");
    Ok(())
}

fn emit(
    ctrl: &TripleDigitController<'_>,
    outputs: DisplayOutputs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let record = Record {
        cycle: ctrl.cycle(),
        value: ctrl.register().read(),
        digit_select: outputs.digit_select,
        nibble: ctrl.nibble().get(),
        segments: outputs.segments.to_string(),
    };
    match format {
        OutputFormat::Text => writeln!(
            out,
            "{:>12}  {:#05x}  {:03b}  {}  {:x}",
            record.cycle, record.value, record.digit_select, record.segments, record.nibble
        )?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn options(ticks: u64, value: u32) -> RunOptions {
        RunOptions {
            // refresh_count = 1: an advance every second tick
            config: ControllerConfig::new(1.0).with_refresh_interval_ns(1),
            ticks,
            value,
            writes: Vec::new(),
            format: OutputFormat::Text,
            all: false,
        }
    }

    fn trace(options: &RunOptions) -> Vec<String> {
        let mut buf = Vec::new();
        run(options, &mut buf).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_build_config_prefers_period() {
        let config = build_config(50e6, Some(10_000.0), 2_000_000).unwrap();
        assert_eq!(config.refresh_count().unwrap(), 200);
    }

    #[test]
    fn test_build_config_rejects_bad_timing() {
        assert!(build_config(0.0, None, 2_000_000).is_err());
        assert!(build_config(50e6, Some(-1.0), 2_000_000).is_err());
        assert!(build_config(50e6, None, 0).is_err());
    }

    #[test]
    fn test_text_trace_prints_changes_only() {
        let lines = trace(&options(6, 0xABC));
        // header + cycle 0 + three advances (cycles 2, 4, 6)
        assert_eq!(lines.len(), 5, "{lines:#?}");
        assert!(lines[1].ends_with("0  0xabc  001  0001000  a"), "{}", lines[1]);
        assert!(lines[2].contains("100  1000110  c"));
        assert!(lines[3].contains("010  0000011  b"));
        assert!(lines[4].contains("001  0001000  a"));
    }

    #[test]
    fn test_all_prints_every_tick() {
        let mut opts = options(10, 0x123);
        opts.all = true;
        assert_eq!(trace(&opts).len(), 12);
    }

    #[test]
    fn test_scheduled_write_changes_segments() {
        let mut opts = options(1, 0x000);
        opts.writes = vec![ScheduledWrite {
            tick: 1,
            value: 0x800,
        }];
        let lines = trace(&opts);
        assert_eq!(lines.len(), 3, "{lines:#?}");
        assert!(lines[2].contains("0x800  001  0000000  8"), "{}", lines[2]);
    }

    #[test]
    fn test_json_lines() {
        let mut opts = options(2, 0xABC);
        opts.format = OutputFormat::Json;
        let lines = trace(&opts);
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["cycle"], 0);
        assert_eq!(first["digit_select"], 1);
        assert_eq!(first["segments"], "0001000");
        assert_eq!(first["nibble"], 10);
    }
}
