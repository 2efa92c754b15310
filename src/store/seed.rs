use crate::models::{Lyric, LyricLine};

/// The example record every fresh store starts with.
pub fn seed_lyrics() -> Vec<Lyric> {
    vec![Lyric {
        id: "1".to_string(),
        title: "示例歌词".to_string(),
        artist: "示例艺术家".to_string(),
        lines: vec![
            LyricLine::new(0.0, "欢迎使用 Simple Lyric"),
            LyricLine::new(5.0, "这是一个极简风格的歌词展示网站"),
            LyricLine::new(10.0, "支持歌词自动滚动播放"),
            LyricLine::new(15.0, "也支持点击跳转到指定歌词"),
            LyricLine::new(20.0, "感谢使用"),
        ],
    }]
}
