// Shared by the bench targets in this directory; each one only uses part of it.
#[allow(dead_code)]
pub fn generate_deck(slides: usize) -> String {
    let body: Vec<String> = (1..=slides)
        .map(|n| {
            format!(
                r#"<div class="slide">
        <h1>Slide {n}</h1>
        <ul>
            <li>Point one</li>
            <li class="highlight">Point two</li>
        </ul>
        <div class="footer">
            2025年9月 - スライド {n}/{slides}
        </div>
    </div>"#
            )
        })
        .collect();
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <link rel=\"stylesheet\" href=\"css/slide-styles.css\">\n</head>\n<body>\n    {}\n</body>\n</html>",
        body.join("\n\n    ")
    )
}
