//! 文本输出 - 千分位、百分比以及各报表的文本格式
use crate::model::{DailyRiders, LineStation, LineStop, PeriodTotal, Station};
use crate::report::{Breakdown, GeneralStats, Share, StationComparison};
use std::io::{self, Write};

/// 整数千分位格式化：`1234567` -> `1,234,567`
pub fn thousands(value: i64) -> String {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(value.unsigned_abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 百分比，保留两位小数并带括号：`(70.00%)`
pub fn percent(value: f64) -> String {
    format!("({value:.2}%)")
}

fn share_line(label: &str, share: &Share) -> String {
    format!("{label} {} {}", thousands(share.riders), percent(share.percentage))
}

pub fn write_general_stats<W: Write>(out: &mut W, stats: &GeneralStats) -> io::Result<()> {
    writeln!(out, "General stats:")?;
    writeln!(out, "  # of stations: {}", thousands(stats.stations))?;
    writeln!(out, "  # of stops: {}", thousands(stats.stops))?;
    writeln!(out, "  # of ride entries: {}", thousands(stats.ride_entries))?;
    match stats.date_range {
        Some((first, last)) => writeln!(out, "  date range: {first} - {last}")?,
        None => writeln!(out, "  date range: n/a")?,
    }
    writeln!(out, "  Total ridership: {}", thousands(stats.total_riders))?;
    for share in &stats.day_types {
        writeln!(out, "  {}", share_line(&format!("{} ridership:", share.label), share))?;
    }
    Ok(())
}

pub fn write_breakdown<W: Write>(out: &mut W, breakdown: &Breakdown) -> io::Result<()> {
    writeln!(out, "{}", breakdown.title)?;
    for row in &breakdown.rows {
        writeln!(out, "{}", share_line(&format!("{} :", row.label), row))?;
    }
    Ok(())
}

pub fn write_stations<W: Write>(out: &mut W, stations: &[Station]) -> io::Result<()> {
    for s in stations {
        writeln!(out, "{} : {}", s.id, s.name)?;
    }
    Ok(())
}

pub fn write_line_stops<W: Write>(out: &mut W, stops: &[LineStop]) -> io::Result<()> {
    for s in stops {
        writeln!(
            out,
            "{} : direction = {} (accessible? {})",
            s.stop_name,
            s.direction,
            if s.accessible { "yes" } else { "no" }
        )?;
    }
    Ok(())
}

pub fn write_period_totals<W: Write>(out: &mut W, title: &str, rows: &[PeriodTotal]) -> io::Result<()> {
    writeln!(out, "{title}")?;
    for r in rows {
        writeln!(out, "{} : {}", r.bucket, thousands(r.riders))?;
    }
    Ok(())
}

fn write_daily<'a, W: Write>(out: &mut W, days: impl Iterator<Item = &'a DailyRiders>) -> io::Result<()> {
    for d in days {
        writeln!(out, "{} {}", d.date, d.riders)?;
    }
    Ok(())
}

pub fn write_comparison<W: Write>(out: &mut W, comparison: &StationComparison) -> io::Result<()> {
    for (idx, side) in [&comparison.first, &comparison.second].into_iter().enumerate() {
        writeln!(out, "Station {}: {} {}", idx + 1, side.station.id, side.station.name)?;
        write_daily(out, side.head().iter().chain(side.tail()))?;
    }
    Ok(())
}

pub fn write_line_stations<W: Write>(out: &mut W, stations: &[LineStation]) -> io::Result<()> {
    for s in stations {
        writeln!(out, "{} : ({}, {})", s.name, s.latitude, s.longitude)?;
    }
    Ok(())
}
