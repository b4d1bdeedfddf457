// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use thiserror::Error;

/// 委托单编号前缀
pub const JOB_CARD_PREFIX: &str = "ARTL-RF-";

/// 委托单编号固定后缀
pub const JOB_CARD_SUFFIX: &str = "-01-01";

/// 每日最大流水号
pub const MAX_DAILY_SEQUENCE: u32 = 99;

/// 委托单编号错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum JobCardError {
    /// 当日流水号已用尽（超过99）
    #[error("Maximum job cards per day ({MAX_DAILY_SEQUENCE}) exceeded")]
    DailyLimitReached,
}

/// 生成给定日期的编号前缀
///
/// # 参数
///
/// * `date` - 业务日期
///
/// # 返回值
///
/// 形如 `ARTL-RF-YYMMDD-` 的前缀
pub fn date_prefix(date: NaiveDate) -> String {
    format!("{}{}-", JOB_CARD_PREFIX, date.format("%y%m%d"))
}

/// 从已有编号中提取流水号
///
/// 编号格式为 `ARTL-RF-YYMMDD-SS-01-01`，流水号是第四段；
/// 无法解析的编号被忽略（与历史数据兼容）
fn sequence_of(job_card_number: &str) -> Option<u32> {
    let parts: Vec<&str> = job_card_number.split('-').collect();
    if parts.len() >= 4 {
        parts[3].parse().ok()
    } else {
        None
    }
}

/// 计算下一个可用的委托单编号
///
/// 取当日已有编号的最大流水号加一（而不是数量加一，
/// 以容忍中途删除造成的空洞）
///
/// # 参数
///
/// * `existing` - 当日已存在的编号列表
/// * `date` - 业务日期
///
/// # 返回值
///
/// * `Ok((number, sequence))` - 下一个编号与其流水号
/// * `Err(JobCardError)` - 当日流水号已用尽
pub fn next_job_card_number(
    existing: &[String],
    date: NaiveDate,
) -> Result<(String, u32), JobCardError> {
    let max_sequence = existing
        .iter()
        .filter_map(|number| sequence_of(number))
        .max()
        .unwrap_or(0);

    let next_sequence = max_sequence + 1;
    if next_sequence > MAX_DAILY_SEQUENCE {
        return Err(JobCardError::DailyLimitReached);
    }

    let number = format!(
        "{}{:02}{}",
        date_prefix(date),
        next_sequence,
        JOB_CARD_SUFFIX
    );
    Ok((number, next_sequence))
}
