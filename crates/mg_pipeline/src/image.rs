use mg_core::CaptionPair;

/// Render URL understood by memegen.link compatible services:
/// `{base}/images/{template}/{top}/{bottom}.jpg` with both captions
/// percent-encoded.
pub fn meme_image_url(base_url: &str, template_id: &str, captions: &CaptionPair) -> String {
    format!(
        "{}/images/{}/{}/{}.jpg",
        base_url.trim_end_matches('/'),
        template_id,
        urlencoding::encode(&captions.top_text),
        urlencoding::encode(&captions.bottom_text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meme_image_url() {
        let captions = CaptionPair::new("WHEN YOU READ THE ARTICLE", "AND REALIZE IT'S JUST CLICKBAIT");
        assert_eq!(
            meme_image_url("https://api.memegen.link", "drake", &captions),
            "https://api.memegen.link/images/drake/WHEN%20YOU%20READ%20THE%20ARTICLE/AND%20REALIZE%20IT%27S%20JUST%20CLICKBAIT.jpg"
        );
    }

    #[test]
    fn test_path_characters_are_encoded() {
        let captions = CaptionPair::new("50/50?", "#1 & done");
        assert_eq!(
            meme_image_url("http://localhost:5000/", "stonks", &captions),
            "http://localhost:5000/images/stonks/50%2F50%3F/%231%20%26%20done.jpg"
        );
    }

    #[test]
    fn test_is_deterministic() {
        let captions = CaptionPair::new("A", "B");
        assert_eq!(
            meme_image_url("https://api.memegen.link", "drake", &captions),
            meme_image_url("https://api.memegen.link", "drake", &captions.clone())
        );
    }
}
