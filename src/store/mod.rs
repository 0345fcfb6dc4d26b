pub mod catalog_reader;
pub mod data_manager;
pub mod match_filter;

use crate::fifo_param::{
    truncate_text, MAX_ARTIST_SIZE, MAX_FEATURES_SIZE, MAX_LANG_SIZE, MAX_LYRICS_SIZE, MAX_TAG_SIZE, MAX_TITLE_SIZE,
};
use crate::normalize_key;

/// 目录文件的分隔符
pub const DELIMITER: char = ',';

/// 目录文件中的一首歌
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Song {
    pub title: String,
    pub tag: String,
    pub artist: String,
    pub year: i32,
    pub views: i32,
    pub features: String,
    pub lyrics: String,
    pub id: i32,
    pub language_cld3: String,
    pub language_ft: String,
    pub language: String,
}

/// 按位置解析一行，字段不够时补空字符串或0
pub fn parse_song(line: &str) -> Song {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields = line.split(DELIMITER);
    let mut text = |cap: usize| truncate_text(fields.next().unwrap_or(""), cap);

    let title = text(MAX_TITLE_SIZE);
    let tag = text(MAX_TAG_SIZE);
    let artist = text(MAX_ARTIST_SIZE);
    let year = parse_int(&text(usize::MAX));
    let views = parse_int(&text(usize::MAX));
    let features = text(MAX_FEATURES_SIZE);
    let lyrics = text(MAX_LYRICS_SIZE);
    let id = parse_int(&text(usize::MAX));
    let language_cld3 = text(MAX_LANG_SIZE);
    let language_ft = text(MAX_LANG_SIZE);
    let language = normalize_key(&text(MAX_LANG_SIZE));

    Song {
        title,
        tag,
        artist,
        year,
        views,
        features,
        lyrics,
        id,
        language_cld3,
        language_ft,
        language,
    }
}

/// 和 atoi 一致：跳过前导空白，可选符号，读取连续数字，其它情况为0，溢出时取边界值
pub fn parse_int(field: &str) -> i32 {
    let field = field.trim_start();
    let (negative, digits) = match field.as_bytes().first() {
        Some(b'-') => (true, &field[1..]),
        Some(b'+') => (false, &field[1..]),
        _ => (false, field),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + (b - b'0') as i64).min(i32::MAX as i64 + 1);
    }
    if negative {
        value = -value;
    }
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
