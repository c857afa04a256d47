//! 命令分发 - 交互式读取-执行循环
//!
//! 状态机：`AwaitingCommand` -> `Executing` -> `AwaitingCommand`，
//! 读到退出令牌（或输入结束）时进入 `Terminated`。
//! 控制台读写集中在 [`Console`]，报表构建器本身不做任何 I/O。
use crate::chart::{Chart, ChartRenderer, GeoExtent};
use crate::constants::{
    COMMAND_PROMPT, EXIT_TOKEN, LINE_COLOR_PROMPT, PLOT_PROMPT, PLOT_TOKENS,
    STATION_PATTERN_PROMPT, UNKNOWN_COMMAND_MESSAGE, WELCOME_BANNER, YEAR_PROMPT,
};
use crate::error::{Error, Result};
use crate::format;
use crate::model::Period;
use crate::report::{self, BreakdownKind, YearRange};
use crate::store::RidershipStore;
use log::{debug, error, info};
use std::io::{self, BufRead, Write};

/// 九个报表命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FindStations,
    AllStations,
    Busiest,
    LeastBusy,
    LineStops,
    ByMonth,
    ByYear,
    CompareStations,
    LineMap,
}

/// 命令对应的报表构建方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Stations,
    Breakdown(BreakdownKind),
    LineStops,
    Period(Period),
    Comparison,
    LineMap,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Self::FindStations,
        Self::AllStations,
        Self::Busiest,
        Self::LeastBusy,
        Self::LineStops,
        Self::ByMonth,
        Self::ByYear,
        Self::CompareStations,
        Self::LineMap,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::FindStations => "1",
            Self::AllStations => "2",
            Self::Busiest => "3",
            Self::LeastBusy => "4",
            Self::LineStops => "5",
            Self::ByMonth => "6",
            Self::ByYear => "7",
            Self::CompareStations => "8",
            Self::LineMap => "9",
        }
    }

    /// 精确匹配（区分大小写）
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.token() == token)
    }

    fn report(self) -> Report {
        match self {
            Self::FindStations => Report::Stations,
            Self::AllStations => Report::Breakdown(BreakdownKind::AllStations),
            Self::Busiest => Report::Breakdown(BreakdownKind::Busiest),
            Self::LeastBusy => Report::Breakdown(BreakdownKind::LeastBusy),
            Self::LineStops => Report::LineStops,
            Self::ByMonth => Report::Period(Period::Month),
            Self::ByYear => Report::Period(Period::Year),
            Self::CompareStations => Report::Comparison,
            Self::LineMap => Report::LineMap,
        }
    }

    /// 以提示输入开头的命令先输出一个空行
    fn opens_with_blank_line(self) -> bool {
        matches!(self, Self::FindStations | Self::LineStops | Self::LineMap)
    }
}

/// 一次读取到的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Exit,
    Run(Command),
    Unknown(String),
}

impl Input {
    pub fn parse(token: &str) -> Self {
        if token == EXIT_TOKEN {
            Self::Exit
        } else if let Some(cmd) = Command::from_token(token) {
            Self::Run(cmd)
        } else {
            Self::Unknown(token.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingCommand,
    Executing(Command),
    Terminated,
}

/// 控制台适配器：输出提示并读取一行
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 输出提示并读取一行（去掉行尾换行）；输入结束时返回 None
    ///
    /// 非 UTF-8 字节按替换字符解码，交由命令匹配按普通输入处理。
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// 会话参数
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub years: YearRange,
    pub map_extent: GeoExtent,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            years: YearRange::default(),
            map_extent: GeoExtent::CHICAGO,
        }
    }
}

/// 交互会话：持有唯一的数据库句柄引用
#[derive(Debug)]
pub struct Session<'a, R, W> {
    store: &'a RidershipStore,
    console: Console<R, W>,
    renderer: &'a mut dyn ChartRenderer,
    settings: SessionSettings,
    state: State,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        store: &'a RidershipStore,
        console: Console<R, W>,
        renderer: &'a mut dyn ChartRenderer,
        settings: SessionSettings,
    ) -> Self {
        Self {
            store,
            console,
            renderer,
            settings,
            state: State::AwaitingCommand,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn out(&mut self) -> &mut W {
        self.console.output()
    }

    /// 提示并读取；输入结束时进入 Terminated
    fn ask(&mut self, text: &str) -> Result<Option<String>> {
        let answer = self.console.prompt(text)?;
        if answer.is_none() {
            debug!("End of input while prompting '{}'", text.trim_end());
            self.state = State::Terminated;
        }
        Ok(answer)
    }

    /// 输出欢迎信息与总体统计，然后循环处理命令直到退出
    pub fn run(&mut self) -> Result<()> {
        info!("Session started");
        writeln!(self.out(), "{WELCOME_BANNER}")?;
        writeln!(self.out())?;

        let stats = report::general_stats(self.store)?;
        format::write_general_stats(self.out(), &stats)?;
        writeln!(self.out())?;

        self.state = State::AwaitingCommand;
        while self.state != State::Terminated {
            self.step()?;
        }

        info!("Session terminated");
        Ok(())
    }

    /// 读取并处理一个令牌
    pub fn step(&mut self) -> Result<()> {
        let Some(token) = self.ask(COMMAND_PROMPT)? else {
            return Ok(());
        };

        match Input::parse(&token) {
            Input::Exit => {
                debug!("Exit token received");
                self.state = State::Terminated;
            }
            Input::Run(cmd) => {
                self.state = State::Executing(cmd);
                self.dispatch(cmd)?;
                if self.state != State::Terminated {
                    self.state = State::AwaitingCommand;
                }
            }
            Input::Unknown(token) => {
                debug!("Unknown command token: {token:?}");
                writeln!(self.out(), "{UNKNOWN_COMMAND_MESSAGE}")?;
                writeln!(self.out())?;
            }
        }
        Ok(())
    }

    /// 执行命令；查找失败与数据库/图表错误只影响本次命令
    fn dispatch(&mut self, cmd: Command) -> Result<()> {
        debug!("Executing command {}", cmd.token());
        if cmd.opens_with_blank_line() {
            writeln!(self.out())?;
        }

        match self.execute(cmd) {
            Ok(()) => {}
            Err(Error::Lookup(outcome)) => writeln!(self.out(), "{outcome}")?,
            Err(Error::Io(e)) => return Err(Error::Io(e)),
            Err(e) => {
                error!("Command {} failed: {e}", cmd.token());
                writeln!(self.out(), "**Error: {e}")?;
            }
        }

        if self.state != State::Terminated {
            writeln!(self.out())?;
        }
        Ok(())
    }

    fn execute(&mut self, cmd: Command) -> Result<()> {
        let store = self.store;
        match cmd.report() {
            Report::Stations => {
                let Some(pattern) = self.ask(STATION_PATTERN_PROMPT)? else {
                    return Ok(());
                };
                let stations = report::find_stations(store, &pattern)?;
                format::write_stations(self.out(), &stations)?;
            }
            Report::Breakdown(kind) => {
                let breakdown = report::breakdown(store, kind)?;
                format::write_breakdown(self.out(), &breakdown)?;
            }
            Report::LineStops => {
                let Some(color) = self.ask(LINE_COLOR_PROMPT)? else {
                    return Ok(());
                };
                let stops = report::line_stops(store, &color)?;
                format::write_line_stops(self.out(), &stops)?;
            }
            Report::Period(period) => {
                let totals = report::period_report(store, period, self.settings.years)?;
                format::write_period_totals(self.out(), totals.title(), &totals.rows)?;
                self.offer_chart(&totals.to_chart())?;
            }
            Report::Comparison => self.compare_stations()?,
            Report::LineMap => {
                let Some(color) = self.ask(LINE_COLOR_PROMPT)? else {
                    return Ok(());
                };
                let map = report::line_map(store, &color)?;
                format::write_line_stations(self.out(), &map.stations)?;
                self.offer_chart(&map.to_chart(self.settings.map_extent))?;
            }
        }
        Ok(())
    }

    /// 两站点逐日对比：第二个站点只有在第一个站点唯一解析后才会提示
    fn compare_stations(&mut self) -> Result<()> {
        let store = self.store;

        writeln!(self.out())?;
        let Some(year) = self.ask(YEAR_PROMPT)? else {
            return Ok(());
        };
        writeln!(self.out())?;

        let Some(first_pattern) = self.ask(&station_prompt(1))? else {
            return Ok(());
        };
        let first = report::resolve_station(store, &first_pattern)?;

        writeln!(self.out())?;
        let Some(second_pattern) = self.ask(&station_prompt(2))? else {
            return Ok(());
        };
        let second = report::resolve_station(store, &second_pattern)?;

        let comparison = report::compare_stations(store, &year, first, second)?;
        format::write_comparison(self.out(), &comparison)?;
        self.offer_chart(&comparison.to_chart())
    }

    /// 询问是否绘图，仅在回答 `y` / `yes` 时渲染
    fn offer_chart(&mut self, chart: &Chart) -> Result<()> {
        writeln!(self.out())?;
        let Some(answer) = self.ask(PLOT_PROMPT)? else {
            return Ok(());
        };
        if !PLOT_TOKENS.contains(&answer.as_str()) {
            return Ok(());
        }

        debug!("Rendering '{}' with {} renderer", chart.title(), self.renderer.name());
        if let Some(path) = self.renderer.render(chart)? {
            writeln!(self.out(), "Chart saved to {}", path.display())?;
        }
        Ok(())
    }
}

fn station_prompt(which: u8) -> String {
    format!("Enter station {which} (wildcards _ and %): ")
}
