use crate::domain::symbols::{Branch, Element, Stem};
use crate::utils::error::{BaziError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, FieldViolation, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// 出生時刻（公曆，無時區）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    /// 只用於報告顯示，不參與計算
    #[serde(default)]
    pub location: Option<String>,
}

impl BirthMoment {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// 驗證後的日曆日期
    pub fn date(&self) -> Result<NaiveDate> {
        self.validate()?;
        self.calendar_date()
    }

    /// 23 點屬於次日子時
    pub fn crosses_midnight(&self) -> bool {
        self.hour == 23
    }

    fn calendar_date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            FieldViolation::new(
                "day",
                self.day,
                format!("{}-{} has no day {}", self.year, self.month, self.day),
            )
            .into_birth_error()
        })
    }
}

impl Validate for BirthMoment {
    fn validate(&self) -> Result<()> {
        validate_range("year", self.year, MIN_YEAR, MAX_YEAR)
            .and_then(|_| validate_range("month", self.month, 1, 12))
            .and_then(|_| validate_range("day", self.day, 1, 31))
            .and_then(|_| validate_range("hour", self.hour, 0, 23))
            .and_then(|_| validate_range("minute", self.minute, 0, 59))
            .map_err(FieldViolation::into_birth_error)?;

        self.calendar_date().map(|_| ())
    }
}

impl fmt::Display for BirthMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}年{}月{}日{}时{:02}分",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "男", alias = "male")]
    Male,
    #[serde(rename = "女", alias = "female")]
    Female,
}

impl FromStr for Gender {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "男" | "male" | "m" => Ok(Gender::Male),
            "女" | "female" | "f" => Ok(Gender::Female),
            other => Err(BaziError::InvalidRequest {
                field: "gender".to_string(),
                reason: format!("性别请输入'男'或'女'，收到 '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "男"),
            Gender::Female => write!(f, "女"),
        }
    }
}

/// 編排層交給核心的排盤請求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub name: String,
    pub gender: Gender,
    pub birth: BirthMoment,
    #[serde(default)]
    pub provided_bazi: Option<String>,
}

impl ChartRequest {
    pub fn new(name: impl Into<String>, gender: Gender, birth: BirthMoment) -> Self {
        Self {
            name: name.into(),
            gender,
            birth,
            provided_bazi: None,
        }
    }

    pub fn with_provided_bazi(mut self, bazi: impl Into<String>) -> Self {
        self.provided_bazi = Some(bazi.into());
        self
    }

    /// 空白的 provided_bazi 視為沒有提供
    pub fn provided_override(&self) -> Option<&str> {
        self.provided_bazi
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl Validate for ChartRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name).map_err(FieldViolation::into_request_error)?;
        self.birth.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarRole {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarRole {
    pub const ALL: [PillarRole; 4] = [
        PillarRole::Year,
        PillarRole::Month,
        PillarRole::Day,
        PillarRole::Hour,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PillarRole::Year => "年柱",
            PillarRole::Month => "月柱",
            PillarRole::Day => "日柱",
            PillarRole::Hour => "时柱",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub role: PillarRole,
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(role: PillarRole, stem: Stem, branch: Branch) -> Self {
        Self { role, stem, branch }
    }

    /// 日柱的天干即日主
    pub fn is_day_master(&self) -> bool {
        self.role == PillarRole::Day
    }

    /// 天干地支奇偶相同才是六十甲子中的組合
    pub fn is_sexagenary(&self) -> bool {
        self.stem.index() % 2 == self.branch.index() % 2
    }

    /// 在六十甲子中的序號（甲子 = 0）
    pub fn cycle_index(&self) -> Option<usize> {
        (0..60).find(|n| n % Stem::COUNT == self.stem.index() && n % Branch::COUNT == self.branch.index())
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarSource {
    Computed,
    Provided,
}

/// 五行計數
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTally {
    counts: [u32; 5],
}

impl ElementTally {
    pub fn from_pillars(pillars: &[Pillar]) -> Self {
        let mut tally = Self::default();
        for pillar in pillars {
            tally.add(pillar.stem.element());
            tally.add(pillar.branch.element());
        }
        tally
    }

    /// 逐字掃描文字中的五行字（相容舊版報告的粗略算法）
    pub fn scan_text(text: &str) -> Self {
        let mut tally = Self::default();
        for element in text.chars().filter_map(Element::from_symbol) {
            tally.add(element);
        }
        tally
    }

    pub fn add(&mut self, element: Element) {
        self.counts[element.slot()] += 1;
    }

    pub fn count(&self, element: Element) -> u32 {
        self.counts[element.slot()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// 總數為 0 時回傳 None
    pub fn percentage(&self, element: Element) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.count(element) as f64 / total as f64 * 100.0),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        Element::ALL.into_iter().map(move |e| (e, self.count(e)))
    }
}

/// 排盤結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaziChart {
    pub pillars: [Pillar; 4],
    pub tally: ElementTally,
    pub notes: Vec<String>,
    pub source: PillarSource,
}

impl BaziChart {
    pub fn pillar(&self, role: PillarRole) -> &Pillar {
        &self.pillars[role as usize]
    }

    pub fn year(&self) -> &Pillar {
        self.pillar(PillarRole::Year)
    }

    pub fn month(&self) -> &Pillar {
        self.pillar(PillarRole::Month)
    }

    pub fn day(&self) -> &Pillar {
        self.pillar(PillarRole::Day)
    }

    pub fn hour(&self) -> &Pillar {
        self.pillar(PillarRole::Hour)
    }

    pub fn day_master(&self) -> Stem {
        self.day().stem
    }

    /// 八個字連寫，例如「癸未甲寅戊午壬子」
    pub fn eight_characters(&self) -> String {
        self.pillars.iter().map(|p| p.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceLevel {
    Excess,
    Deficient,
    Balanced,
}

impl BalanceLevel {
    pub const EXCESS_ABOVE: f64 = 30.0;
    pub const DEFICIENT_BELOW: f64 = 10.0;

    pub fn classify(percentage: f64) -> Self {
        if percentage > Self::EXCESS_ABOVE {
            BalanceLevel::Excess
        } else if percentage < Self::DEFICIENT_BELOW {
            BalanceLevel::Deficient
        } else {
            BalanceLevel::Balanced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BalanceLevel::Excess => "偏旺",
            BalanceLevel::Deficient => "偏弱",
            BalanceLevel::Balanced => "平衡",
        }
    }
}

/// 五行平衡分析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub tally: ElementTally,
    pub percentages: BTreeMap<Element, f64>,
    pub classifications: BTreeMap<Element, BalanceLevel>,
    pub deficient: BTreeSet<Element>,
    pub excess: BTreeSet<Element>,
    pub missing: BTreeSet<Element>,
    pub advice: String,
}

impl BalanceReport {
    pub fn level(&self, element: Element) -> Option<BalanceLevel> {
        self.classifications.get(&element).copied()
    }
}

/// 五行計數模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallyMode {
    #[default]
    Structural,
    TextScan,
}

/// 平衡分析的輸入來源
#[derive(Debug, Clone, Copy)]
pub enum TallySource<'a> {
    Structured(&'a ElementTally),
    ReportText(&'a str),
}

impl TallySource<'_> {
    pub fn tally(&self) -> ElementTally {
        match self {
            TallySource::Structured(tally) => **tally,
            TallySource::ReportText(text) => ElementTally::scan_text(text),
        }
    }
}
