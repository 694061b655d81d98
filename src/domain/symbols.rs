//! 天干、地支與五行的固定對照表。

use serde::{Deserialize, Serialize};
use std::fmt;

const STEM_SYMBOLS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];
const BRANCH_SYMBOLS: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

const STEM_ELEMENTS: [Element; 10] = [
    Element::Wood,
    Element::Wood,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Water,
    Element::Water,
];

const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

/// 五行
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// 報告輸出時沿用「金木水火土」的順序
    pub const REPORT_ORDER: [Element; 5] = [
        Element::Metal,
        Element::Wood,
        Element::Water,
        Element::Fire,
        Element::Earth,
    ];

    pub fn symbol(self) -> char {
        match self {
            Element::Wood => '木',
            Element::Fire => '火',
            Element::Earth => '土',
            Element::Metal => '金',
            Element::Water => '水',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.symbol() == c)
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 天干，序號 0..10 對應甲..癸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stem(u8);

impl Stem {
    pub const COUNT: usize = 10;

    /// 取模後建立，負數也會落在 0..10
    pub fn from_index(index: i64) -> Self {
        Self(index.rem_euclid(Self::COUNT as i64) as u8)
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        STEM_SYMBOLS
            .iter()
            .position(|&s| s == c)
            .map(|i| Self(i as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn symbol(self) -> char {
        STEM_SYMBOLS[self.index()]
    }

    pub fn element(self) -> Element {
        STEM_ELEMENTS[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Stem> {
        (0..Self::COUNT as u8).map(Stem)
    }
}

/// 地支，序號 0..12 對應子..亥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Branch(u8);

impl Branch {
    pub const COUNT: usize = 12;

    pub fn from_index(index: i64) -> Self {
        Self(index.rem_euclid(Self::COUNT as i64) as u8)
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        BRANCH_SYMBOLS
            .iter()
            .position(|&s| s == c)
            .map(|i| Self(i as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn symbol(self) -> char {
        BRANCH_SYMBOLS[self.index()]
    }

    pub fn element(self) -> Element {
        BRANCH_ELEMENTS[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Branch> {
        (0..Self::COUNT as u8).map(Branch)
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// 序列化成單一漢字，方便直接放進 prompt context
impl Serialize for Stem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Stem {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        single_char(&s)
            .and_then(Stem::from_symbol)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown heavenly stem: {}", s)))
    }
}

impl Serialize for Branch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Branch {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        single_char(&s)
            .and_then(Branch::from_symbol)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown earthly branch: {}", s)))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_elements_follow_pairs() {
        let elements: String = Stem::all().map(|s| s.element().symbol()).collect();
        assert_eq!(elements, "木木火火土土金金水水");
    }

    #[test]
    fn test_branch_elements() {
        let elements: String = Branch::all().map(|b| b.element().symbol()).collect();
        assert_eq!(elements, "水土木木土火火土金金土水");
    }

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Stem::from_index(16).symbol(), '庚');
        assert_eq!(Stem::from_index(-1).symbol(), '癸');
        assert_eq!(Branch::from_index(12).symbol(), '子');
        assert_eq!(Branch::from_index(-1).symbol(), '亥');
    }

    #[test]
    fn test_symbol_lookup_rejects_other_alphabet() {
        assert_eq!(Stem::from_symbol('戊').map(Stem::index), Some(4));
        assert!(Stem::from_symbol('子').is_none());
        assert!(Branch::from_symbol('甲').is_none());
        assert_eq!(Element::from_symbol('金'), Some(Element::Metal));
        assert_eq!(Element::from_symbol('月'), None);
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&Stem::from_index(6)).unwrap();
        assert_eq!(json, "\"庚\"");
        let branch: Branch = serde_json::from_str("\"午\"").unwrap();
        assert_eq!(branch.index(), 6);
        assert!(serde_json::from_str::<Branch>("\"甲\"").is_err());
        assert_eq!(serde_json::to_string(&Element::Water).unwrap(), "\"water\"");
    }
}
