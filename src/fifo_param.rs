//! 管道上传输的定长结构
//!
//! 请求、响应都是定长二进制，布局和建索引工具保持一致：
//! 文本字段按容量补 0，整数为小端。

use crate::store::Song;

pub const MAX_TITLE_SIZE: usize = 128;
pub const MAX_ARTIST_SIZE: usize = 128;
pub const MAX_TAG_SIZE: usize = 64;
pub const MAX_FEATURES_SIZE: usize = 128;
pub const MAX_LYRICS_SIZE: usize = 512;
pub const MAX_LANG_SIZE: usize = 16;

/// 请求大小: title + artist
pub const CRITERIA_SIZE: usize = MAX_TITLE_SIZE + MAX_ARTIST_SIZE;
/// 响应中匹配数量的大小
pub const COUNT_SIZE: usize = 4;
/// 一首歌的大小
pub const SONG_SIZE: usize = MAX_TITLE_SIZE
    + MAX_TAG_SIZE
    + MAX_ARTIST_SIZE
    + 4
    + 4
    + MAX_FEATURES_SIZE
    + MAX_LYRICS_SIZE
    + 4
    + MAX_LANG_SIZE * 3;

/// 截断到 cap - 1 个字节(给结尾的 0 留位置)，不切断 utf8 字符
pub fn truncate_text(text: &str, cap: usize) -> String {
    let limit = cap.saturating_sub(1);
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// 读取到第一个 0 为止
pub fn decode_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

fn put_text(buf: &mut Vec<u8>, text: &str, cap: usize) {
    let text = truncate_text(text, cap);
    buf.extend_from_slice(text.as_bytes());
    buf.resize(buf.len() + cap - text.len(), 0);
}

fn put_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// 顺序读取定长字段
struct PayloadReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        PayloadReader { data, pos: 0 }
    }

    fn text(&mut self, cap: usize) -> String {
        let text = decode_text(&self.data[self.pos..self.pos + cap]);
        self.pos += cap;
        truncate_text(&text, cap)
    }

    fn i32(&mut self) -> i32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.data[self.pos..self.pos + 4]);
        self.pos += 4;
        i32::from_le_bytes(raw)
    }
}

/// 查询条件，artist 为空表示不过滤
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchCriteria {
    pub title: String,
    pub artist: String,
}

impl SearchCriteria {
    pub fn new(title: &str, artist: &str) -> Self {
        SearchCriteria {
            title: truncate_text(title, MAX_TITLE_SIZE),
            artist: truncate_text(artist, MAX_ARTIST_SIZE),
        }
    }

    pub fn decode(payload: &[u8; CRITERIA_SIZE]) -> Self {
        let mut reader = PayloadReader::new(payload);
        let title = reader.text(MAX_TITLE_SIZE);
        let artist = reader.text(MAX_ARTIST_SIZE);
        SearchCriteria { title, artist }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(CRITERIA_SIZE);
        put_text(&mut buf, &self.title, MAX_TITLE_SIZE);
        put_text(&mut buf, &self.artist, MAX_ARTIST_SIZE);
        buf
    }
}

pub fn encode_count(count: usize) -> [u8; COUNT_SIZE] {
    (count as i32).to_le_bytes()
}

pub fn decode_count(raw: [u8; COUNT_SIZE]) -> i32 {
    i32::from_le_bytes(raw)
}

pub fn encode_song(song: &Song) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SONG_SIZE);
    put_text(&mut buf, &song.title, MAX_TITLE_SIZE);
    put_text(&mut buf, &song.tag, MAX_TAG_SIZE);
    put_text(&mut buf, &song.artist, MAX_ARTIST_SIZE);
    put_i32(&mut buf, song.year);
    put_i32(&mut buf, song.views);
    put_text(&mut buf, &song.features, MAX_FEATURES_SIZE);
    put_text(&mut buf, &song.lyrics, MAX_LYRICS_SIZE);
    put_i32(&mut buf, song.id);
    put_text(&mut buf, &song.language_cld3, MAX_LANG_SIZE);
    put_text(&mut buf, &song.language_ft, MAX_LANG_SIZE);
    put_text(&mut buf, &song.language, MAX_LANG_SIZE);
    buf
}

pub fn decode_song(payload: &[u8; SONG_SIZE]) -> Song {
    let mut reader = PayloadReader::new(payload);
    Song {
        title: reader.text(MAX_TITLE_SIZE),
        tag: reader.text(MAX_TAG_SIZE),
        artist: reader.text(MAX_ARTIST_SIZE),
        year: reader.i32(),
        views: reader.i32(),
        features: reader.text(MAX_FEATURES_SIZE),
        lyrics: reader.text(MAX_LYRICS_SIZE),
        id: reader.i32(),
        language_cld3: reader.text(MAX_LANG_SIZE),
        language_ft: reader.text(MAX_LANG_SIZE),
        language: reader.text(MAX_LANG_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use crate::fifo_param::{decode_song, encode_song, truncate_text, SearchCriteria, CRITERIA_SIZE, MAX_TITLE_SIZE, SONG_SIZE};
    use crate::store::parse_song;

    #[test]
    pub fn test_layout_size() {
        assert_eq!(CRITERIA_SIZE, 256);
        assert_eq!(SONG_SIZE, 1020);
    }

    #[test]
    pub fn test_truncate_text() {
        assert_eq!(truncate_text("abc", 4), "abc");
        assert_eq!(truncate_text("abcd", 4), "abc");
        // "é" 占两个字节，不能被切开
        assert_eq!(truncate_text("aé", 3), "a");
        assert_eq!(truncate_text(&"x".repeat(300), MAX_TITLE_SIZE).len(), 127);
    }

    #[test]
    pub fn test_criteria_decode() {
        let mut payload = [0u8; CRITERIA_SIZE];
        payload[..7].copy_from_slice(b"Imagine");
        payload[128..136].copy_from_slice(b"Yoko Ono");
        let criteria = SearchCriteria::decode(&payload);
        assert_eq!(criteria, SearchCriteria::new("Imagine", "Yoko Ono"));
        assert_eq!(criteria.encode(), payload.to_vec());
    }

    #[test]
    pub fn test_criteria_without_terminator() {
        // 客户端把 title 填满，没有结尾的 0
        let payload = [b'a'; CRITERIA_SIZE];
        let criteria = SearchCriteria::decode(&payload);
        assert_eq!(criteria.title.len(), 127);
        assert_eq!(criteria.artist.len(), 127);
    }

    #[test]
    pub fn test_song_layout() {
        let song = parse_song("Imagine,Pop,John Lennon,1971,500000,,,1,en,en,EN");
        let bytes = encode_song(&song);
        assert_eq!(bytes.len(), SONG_SIZE);
        assert_eq!(&bytes[..7], b"Imagine");
        assert_eq!(&bytes[128..131], b"Pop");
        assert_eq!(&bytes[192..203], b"John Lennon");
        assert_eq!(&bytes[320..324], &1971i32.to_le_bytes());
        assert_eq!(&bytes[324..328], &500000i32.to_le_bytes());
        assert_eq!(&bytes[968..972], &1i32.to_le_bytes());
        assert_eq!(&bytes[1004..1006], b"en");

        let mut payload = [0u8; SONG_SIZE];
        payload.copy_from_slice(&bytes);
        assert_eq!(decode_song(&payload), song);
    }
}
