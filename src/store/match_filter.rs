use crate::fifo_param::SearchCriteria;
use crate::normalize_key;
use crate::store::Song;

/// 按 title 精确匹配，artist 非空时再按 artist 精确匹配，结果达到上限后停止
pub struct MatchFilter {
    title: String,
    artist: String,
    capacity: usize,
    results: Vec<Song>,
}

impl MatchFilter {
    pub fn new(criteria: &SearchCriteria, capacity: usize) -> MatchFilter {
        MatchFilter {
            title: normalize_key(&criteria.title),
            artist: normalize_key(&criteria.artist),
            capacity,
            results: Vec::new(),
        }
    }

    /// 转小写后的查询 title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 索引节点中的 key 是否可能匹配，不匹配就不用去读目录文件
    pub fn key_matches(&self, key: &str) -> bool {
        normalize_key(key) == self.title
    }

    pub fn accepts(&self, song: &Song) -> bool {
        if normalize_key(&song.title) != self.title {
            return false;
        }
        self.artist.is_empty() || normalize_key(&song.artist) == self.artist
    }

    /// 匹配则加入结果，返回是否加入
    pub fn offer(&mut self, song: Song) -> bool {
        if self.is_full() || !self.accepts(&song) {
            return false;
        }
        self.results.push(song);
        true
    }

    pub fn is_full(&self) -> bool {
        self.results.len() >= self.capacity
    }

    pub fn into_results(self) -> Vec<Song> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use crate::fifo_param::SearchCriteria;
    use crate::store::match_filter::MatchFilter;
    use crate::store::parse_song;

    #[test]
    pub fn test_title_only() {
        let filter = MatchFilter::new(&SearchCriteria::new("IMAGINE", ""), 10);
        assert_eq!(filter.title(), "imagine");
        assert!(filter.key_matches("Imagine"));
        assert!(!filter.key_matches("Imagine (Remastered)"));
        assert!(filter.accepts(&parse_song("imagine,Pop,Anyone,1,1,,,1,en,en,en")));
        // 不做子串匹配
        assert!(!filter.accepts(&parse_song("Imagine Dragons,Pop,Anyone,1,1,,,1,en,en,en")));
    }

    #[test]
    pub fn test_artist_filter() {
        let filter = MatchFilter::new(&SearchCriteria::new("Imagine", "john lennon"), 10);
        assert!(filter.accepts(&parse_song("Imagine,Pop,John Lennon,1971,500000,,,1,en,en,en")));
        assert!(!filter.accepts(&parse_song("Imagine,Pop,Yoko Ono,1971,500000,,,1,en,en,en")));
        assert!(!filter.accepts(&parse_song("Imagine,Pop,John Lennon & Yoko Ono,1971,1,,,1,en,en,en")));
    }

    #[test]
    pub fn test_capacity() {
        let mut filter = MatchFilter::new(&SearchCriteria::new("a", ""), 2);
        assert!(filter.offer(parse_song("a,x,1")));
        assert!(!filter.offer(parse_song("b,x,2")));
        assert!(!filter.is_full());
        assert!(filter.offer(parse_song("A,x,3")));
        assert!(filter.is_full());
        assert!(!filter.offer(parse_song("a,x,4")));

        let results = filter.into_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].title, "A");
    }
}
