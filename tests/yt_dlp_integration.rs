use batrouna_bot::music::source::MediaResolver;

#[tokio::test]
#[ignore] // Requires yt-dlp installed and network access
async fn test_resolve_url() {
    let resolver = MediaResolver::default();
    let result = resolver
        .resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .await;
    assert!(result.is_ok(), "resolve failed: {:?}", result.err());
    let track = result.unwrap();
    assert!(!track.title.is_empty());
    assert!(track.url.contains("youtube.com") || track.url.contains("youtu.be"));
    assert!(track.duration.is_some());
}

#[tokio::test]
#[ignore] // Requires yt-dlp installed and network access
async fn test_resolve_query_takes_first_result() {
    let resolver = MediaResolver::default();
    let result = resolver.resolve("never gonna give you up rick astley").await;
    assert!(result.is_ok(), "search failed: {:?}", result.err());
    assert!(!result.unwrap().title.is_empty());
}

#[tokio::test]
#[ignore] // Requires yt-dlp installed and network access
async fn test_search_returns_top_five() {
    let resolver = MediaResolver::default();
    let tracks = resolver.search("lofi hip hop").await.unwrap();
    assert!(!tracks.is_empty());
    assert!(tracks.len() <= 5);
}
