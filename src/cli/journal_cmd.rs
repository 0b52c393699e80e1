// src/cli/journal_cmd.rs
//! 事件命令 - 单个事件、journal 流、测试消息
//!
//! journal 是逐行 JSON，格式错误的行只记录日志并跳过。

use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing::warn;

use super::output::format_outcome;
use crate::tracker::{CarrierTracker, EventOutcome};

/// Event 命令参数
#[derive(Args)]
pub struct EventArgs {
    /// 单个事件的 JSON 记录
    pub payload: String,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// Journal 命令参数
#[derive(Args)]
pub struct JournalArgs {
    /// journal 文件路径（默认读取 stdin）
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// journal 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JournalSummary {
    pub processed: usize,
    pub skipped: usize,
    pub delivered: usize,
}

/// 处理 event 命令
pub fn handle_event(tracker: &mut CarrierTracker, args: EventArgs) -> Result<EventOutcome> {
    let outcome = tracker
        .handle_line(&args.payload)
        .with_context(|| format!("Failed to parse event: {}", args.payload))?;
    println!("{}", format_outcome(&outcome, args.json));
    Ok(outcome)
}

/// 处理 journal 命令
pub fn handle_journal(tracker: &mut CarrierTracker, args: JournalArgs) -> Result<JournalSummary> {
    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Cannot open journal {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    process_journal(tracker, reader, |outcome| {
        if !matches!(outcome, EventOutcome::Ignored) {
            println!("{}", format_outcome(outcome, args.json));
        }
    })
}

/// 逐行处理 journal，每个非忽略事件回调一次
pub fn process_journal<R, F>(
    tracker: &mut CarrierTracker,
    reader: R,
    mut on_outcome: F,
) -> Result<JournalSummary>
where
    R: BufRead,
    F: FnMut(&EventOutcome),
{
    let mut summary = JournalSummary::default();

    // 按字节切行，非 UTF-8 的行与 JSON 错误一样跳过
    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.context("Failed to read journal")?;
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                summary.skipped += 1;
                warn!(line = index + 1, error = %e, "Skipping non UTF-8 journal line");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match tracker.handle_line(&line) {
            Ok(outcome) => {
                summary.processed += 1;
                if matches!(&outcome, EventOutcome::Dispatched(result) if result.is_delivered()) {
                    summary.delivered += 1;
                }
                on_outcome(&outcome);
            }
            Err(e) => {
                summary.skipped += 1;
                warn!(line = index + 1, error = %e, "Skipping malformed journal line");
            }
        }
    }

    Ok(summary)
}

/// 处理 test 命令
pub fn handle_test(tracker: &mut CarrierTracker, json: bool) -> Result<()> {
    let (request, cancel) = tracker.send_test_messages();
    println!("{}", format_outcome(&request, json));
    println!("{}", format_outcome(&cancel, json));
    Ok(())
}
