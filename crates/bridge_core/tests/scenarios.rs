use std::sync::Once;

use bridge_core::{
    convert, extract, Converter, ExtractError, MarkdownConverter, Method, PatternConfig,
    PromptPipeline, Strategy,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bridge_logging::initialize_for_tests);
}

fn pipeline() -> PromptPipeline {
    PromptPipeline::new(MarkdownConverter)
}

#[test]
fn marker_pair_inside_paragraphs() {
    init_logging();
    let html = "<p>Hello</p><p>---SOP---</p><p>do X</p><p>---EOP---</p>";

    let markdown = convert(html);
    let lines: Vec<&str> = markdown.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines, vec!["Hello", "---SOP---", "do X", "---EOP---"]);

    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    assert_eq!(result.text, "do X");
    assert_eq!(result.method, Method::Marker);
}

#[test]
fn phrase_fallback_without_markers() {
    init_logging();
    let html = "<p>以下を実行して</p><p>Task A</p><p>Task B</p>";

    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    // paragraphs keep their blank separator line
    assert_eq!(result.text, "Task A\n\nTask B");
    assert_eq!(result.method, Method::Fallback);
    assert_eq!(result.strategy, Strategy::Phrase);
}

#[test]
fn start_marker_without_end_marker() {
    init_logging();
    let html = "<p>Sure, here it is.</p><p>---SOP---</p><div>one<br>two<br>three</div>";

    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    assert_eq!(result.text, "one\ntwo\nthree");
    assert_eq!(result.method, Method::Marker);
    assert_eq!(result.strategy, Strategy::MarkerStart);
}

#[test]
fn nothing_configured_is_present() {
    init_logging();
    let html = "<p>Just a regular answer.</p><ul><li>with</li><li>a list</li></ul>";

    assert_eq!(
        pipeline().run(html, &PatternConfig::default()),
        Err(ExtractError::NotFound)
    );
}

#[test]
fn nested_list_rendering() {
    let html = "<ol><li>First</li><li>Second<ul><li>Nested</li></ul></li></ol>";
    assert_eq!(
        MarkdownConverter.to_markdown(html),
        "1. First\n2. Second\n  - Nested"
    );
}

#[test]
fn blank_fragment_is_empty_input() {
    assert_eq!(
        pipeline().run("  \n ", &PatternConfig::default()),
        Err(ExtractError::EmptyInput)
    );
    assert_eq!(convert("  \n "), "");
    assert_eq!(
        extract(&convert(""), &PatternConfig::default()),
        Err(ExtractError::NotFound)
    );
}

#[test]
fn markers_win_over_phrases_in_rendered_html() {
    let html = concat!(
        "<p>以下のプロンプト</p><p>phrase text</p>",
        "<p>---SOP---</p><p>marked text</p><p>---EOP---</p>"
    );
    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    assert_eq!(result.text, "marked text");
    assert_eq!(result.strategy, Strategy::MarkerPair);
}

#[test]
fn phrase_wins_over_keyword_in_rendered_html() {
    let html = "<p>目的：速くする</p><p>以下の指示</p><p>build it</p>";
    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    assert_eq!(result.text, "build it");
    assert_eq!(result.strategy, Strategy::Phrase);
}

#[test]
fn keyword_fallback_keeps_the_keyword_line() {
    let html = "<p>前置き</p><p>目的：速くする</p><p>完了条件：テストが通る</p>";
    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    assert_eq!(result.text, "目的：速くする\n\n完了条件：テストが通る");
    assert_eq!(result.strategy, Strategy::Keyword);
}

#[test]
fn horizontal_rule_acts_as_delimiter() {
    let html = "<p>Some analysis.</p><hr><p>Refactor the parser.</p>";
    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    assert_eq!(result.text, "Refactor the parser.");
    assert_eq!(result.strategy, Strategy::Delimiter);
}

#[test]
fn code_inside_prompt_survives_verbatim() {
    let html = concat!(
        "<p>---SOP---</p>",
        "<pre><code class=\"language-md\"># Title\n*not italic* `tick`</code></pre>",
        "<p>---EOP---</p>"
    );
    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    assert_eq!(result.text, "```md\n# Title\n*not italic* `tick`\n```");
}

#[test]
fn realistic_chat_response() {
    let html = r#"<div class="markdown prose"><p>Here is the prompt:</p>
<p>---SOP---</p>
<h2>Task</h2>
<p>Add a <strong>retry</strong> to <code>fetch()</code>, see <a href="https://example.com/docs">docs</a>.</p>
<ul>
<li>Keep the API</li>
<li>Write tests</li>
</ul>
<p>---EOP---</p>
<p>Let me know!</p></div>"#;

    let result = pipeline().run(html, &PatternConfig::default()).unwrap();
    assert_eq!(
        result.text,
        "## Task\n\nAdd a **retry** to `fetch()`, see [docs](https://example.com/docs).\n\n- Keep the API\n- Write tests"
    );
    assert_eq!(result.method, Method::Marker);
}

#[test]
fn deeply_nested_response_still_yields_the_marked_prompt() {
    init_logging();
    let html = format!(
        "{}<p>---SOP---</p><p>do X</p><p>---EOP---</p>{}",
        "<div>".repeat(10_000),
        "</div>".repeat(10_000)
    );

    let result = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || pipeline().run(&html, &PatternConfig::default()))
        .unwrap()
        .join()
        .unwrap()
        .unwrap();
    assert_eq!(result.text, "do X");
    assert_eq!(result.strategy, Strategy::MarkerPair);
}

#[test]
fn conversion_is_deterministic() {
    let html = "<div><p>a</p><ol><li>b</li></ol><pre><code>c</code></pre></div>";
    assert_eq!(convert(html), convert(html));
}
