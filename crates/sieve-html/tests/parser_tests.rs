//! Integration tests for the filtering parser.

use sieve_dom::{Node, serialize};
use sieve_html::{
    BuilderState, HtmlFilter, IssueKind, TagRegistry, TagRule, Token, TreeBuilder,
};

/// Helper to filter with the default whitelist and return the markup
fn filter(input: &str) -> String {
    serialize(&HtmlFilter::new().parse(input))
}

/// Helper to collect the issue kinds of a parse
fn issue_kinds(filter: &HtmlFilter, input: &str) -> Vec<IssueKind> {
    filter
        .parse_with_report(input)
        .issues
        .iter()
        .map(|issue| issue.kind)
        .collect()
}

// ========== reassembly ==========

#[test]
fn test_single_tag() {
    assert_eq!(filter("<span>test this</span>"), "<span>test this</span>");
}

#[test]
fn test_nested_tags() {
    assert_eq!(
        filter("<span>test this <strong>text</strong></span>"),
        "<span>test this <strong>text</strong></span>"
    );
}

#[test]
fn test_text_first() {
    assert_eq!(
        filter("this is some text<span>test this</span>"),
        "this is some text<span>test this</span>"
    );
}

#[test]
fn test_void_without_slash_is_normalized() {
    assert_eq!(
        filter("<div><input><span>test this</span></div>"),
        "<div><input /><span>test this</span></div>"
    );
}

#[test]
fn test_void_forms_all_normalize() {
    assert_eq!(filter("<br>"), "<br />");
    assert_eq!(filter("<br/>"), "<br />");
    assert_eq!(filter("<br   />"), "<br />");
}

#[test]
fn test_registered_container_written_self_closing() {
    assert_eq!(filter("<div/>after"), "<div />after");
}

#[test]
fn test_single_attribute() {
    assert_eq!(
        filter(r#"<span class="test">test this</span>"#),
        r#"<span class="test">test this</span>"#
    );
}

#[test]
fn test_double_attribute() {
    assert_eq!(
        filter(r#"<span class="test" style="float: right;">test this</span>"#),
        r#"<span class="test" style="float: right;">test this</span>"#
    );
}

#[test]
fn test_nested_tags_with_attributes() {
    let input = r#"<div class="outerDiv"><input type="text" name="mightyInput" /><span class="test" style="float: right;">test this</span></div>"#;
    assert_eq!(filter(input), input);
}

#[test]
fn test_source_casing_preserved() {
    assert_eq!(filter("<DIV>x</div>"), "<DIV>x</DIV>");
}

// ========== attributes ==========

#[test]
fn test_attributes_harvested_per_tag() {
    let nodes = HtmlFilter::new().parse(
        r#"<div class="outerDiv"><input type="text" name="mightyInput" /><span class="test" style="float: right;">test this</span></div>"#,
    );
    assert_eq!(nodes.len(), 1);
    let div = nodes[0].as_tag().expect("div");
    assert_eq!(div.attributes(), [r#"class="outerDiv""#]);

    let children = div.children();
    assert_eq!(
        children[0].attributes(),
        [r#"type="text""#, r#"name="mightyInput""#]
    );
    assert_eq!(
        children[1].attributes(),
        [r#"class="test""#, r#"style="float: right;""#]
    );
}

#[test]
fn test_attribute_whitelist() {
    let mut filter = HtmlFilter::new();
    filter
        .register_tag("a", TagRule::container().with_attributes(["href", "title"]))
        .unwrap();
    let report =
        filter.parse_with_report(r#"<a href="/x" onclick="evil()" TITLE="t">link</a>"#);
    assert_eq!(report.text(), r#"<a href="/x" TITLE="t">link</a>"#);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::DroppedAttribute);
    assert_eq!(report.issues[0].attribute.as_deref(), Some("onclick"));
}

// ========== subtree omission ==========

#[test]
fn test_unknown_tag_dropped_with_subtree() {
    assert_eq!(
        filter(
            r#"<div class="outerDiv"><invalidTag><input type="text" name="mightyInput" /></invalidTag><span class="test" style="float: right;">test this</span></div>"#
        ),
        r#"<div class="outerDiv"><span class="test" style="float: right;">test this</span></div>"#
    );
}

#[test]
fn test_unknown_tag_nested_same_name() {
    assert_eq!(
        filter("<x><x>inner</x>still dropped</x><b>kept</b>"),
        "<b>kept</b>"
    );
}

#[test]
fn test_unknown_end_tag_case_insensitive() {
    assert_eq!(filter("<Blink>a</BLINK>b"), "b");
}

#[test]
fn test_unknown_self_closing_dropped_alone() {
    assert_eq!(filter("<span>a<widget />b</span>"), "<span>ab</span>");
}

#[test]
fn test_skip_to_end_of_input() {
    assert_eq!(filter("<b>kept</b><script>alert(1)"), "<b>kept</b>");
}

// ========== nesting context ==========

#[test]
fn test_nestable_elements_kept() {
    assert_eq!(
        filter("<table><tr><td>should still be here</td></tr></table>"),
        "<table><tr><td>should still be here</td></tr></table>"
    );
}

#[test]
fn test_nestable_elements_removed() {
    assert_eq!(
        filter("<span><tr><td>should still be here</td></tr></span>"),
        "<span></span>"
    );
}

#[test]
fn test_restricted_tag_at_top_level_dropped() {
    assert_eq!(filter("<li>orphan</li><ul><li>ok</li></ul>"), "<ul><li>ok</li></ul>");
}

#[test]
fn test_context_issue_reported() {
    assert_eq!(
        issue_kinds(&HtmlFilter::new(), "<span><td>x</td></span>"),
        vec![IssueKind::DisallowedParent]
    );
}

// ========== malformed ==========

#[test]
fn test_malformed_truncates() {
    assert_eq!(
        filter("this is some <text <spanan>test this</span>"),
        "this is some "
    );
}

#[test]
fn test_malformed_keeps_closed_nodes_only() {
    let report = HtmlFilter::new().parse_with_report("<b>done</b><div>open <i <b>");
    assert!(report.halted);
    assert_eq!(report.text(), "<b>done</b>");
    assert_eq!(report.issues.last().map(|issue| issue.kind), Some(IssueKind::Malformed));
}

#[test]
fn test_malformed_inside_skipped_subtree_halts() {
    let report = HtmlFilter::new().parse_with_report("a<x>b <c d</x>e");
    assert!(report.halted);
    assert_eq!(report.text(), "a");
}

// ========== literal less-than ==========

#[test]
fn test_literal_less_than_is_escaped() {
    assert_eq!(filter("1 < 2 <b>and</b> <3"), "1 &lt; 2 <b>and</b> &lt;3");
}

#[test]
fn test_dropped_tag_cannot_splice_a_script_tag() {
    let once = filter("<<x></x>script>alert(1)<<x></x>/script>");
    assert_eq!(once, "&lt;script>alert(1)&lt;/script>");
    assert!(!once.contains("<script"));
    assert_eq!(filter(&once), once);
}

#[test]
fn test_dropped_tag_cannot_splice_a_registered_tag() {
    let once = filter("x<<foo>y</foo>span>");
    assert_eq!(once, "x&lt;span>");
    assert!(!once.contains("<span"));
    assert_eq!(filter(&once), once);
}

// ========== end tags ==========

#[test]
fn test_unclosed_tags_discarded() {
    let filter = HtmlFilter::new();
    let report = filter.parse_with_report("before<div>never <b>closed</b>");
    assert!(!report.halted);
    assert_eq!(report.text(), "before");
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::UnclosedTag);
    assert_eq!(report.issues[0].tag.as_deref(), Some("div"));
    assert_eq!(report.issues[0].offset, 6);
}

#[test]
fn test_stray_end_tag_ignored() {
    assert_eq!(filter("</span>a<b>x</i>y</b>"), "a<b>xy</b>");
    assert_eq!(
        issue_kinds(&HtmlFilter::new(), "</span>a<b>x</i>y</b>"),
        vec![IssueKind::StrayEndTag, IssueKind::StrayEndTag]
    );
}

#[test]
fn test_void_end_tag_does_not_close_parent() {
    assert_eq!(
        filter("<div><input></input>text</div>"),
        "<div><input />text</div>"
    );
}

// ========== registry mutation ==========

#[test]
fn test_configure_new_element() {
    let input = "<span>this shows always</span><invalidtag>this shows after configured</invalidtag>";
    let mut filter = HtmlFilter::new();

    let before = filter.parse(input);
    assert_eq!(serialize(&before), "<span>this shows always</span>");

    filter.register_tag("invalidtag", TagRule::container()).unwrap();
    assert_eq!(
        serialize(&filter.parse(input)),
        "<span>this shows always</span><invalidtag>this shows after configured</invalidtag>"
    );
    // The earlier result is untouched.
    assert_eq!(serialize(&before), "<span>this shows always</span>");
}

#[test]
fn test_register_as_void() {
    let mut filter = HtmlFilter::new();
    filter.register_tag("wbr", TagRule::void()).unwrap();
    assert_eq!(filter.filter("a<wbr>b"), "a<wbr />b");
}

#[test]
fn test_empty_registry_keeps_text_only() {
    let filter = HtmlFilter::with_registry(TagRegistry::empty());
    assert_eq!(filter.filter("a<b>b</b>c<br/>d"), "acd");
    // Without a rule, `<br>` is an ordinary unknown container.
    assert_eq!(filter.filter("a<br>b"), "a");
}

// ========== result shape ==========

#[test]
fn test_top_level_sequence() {
    let nodes = HtmlFilter::new().parse("t<b>x</b>u");
    assert_eq!(nodes.len(), 3);
    assert!(matches!(&nodes[0], Node::Text(text) if text.content() == "t"));
    assert!(matches!(&nodes[1], Node::Tag(tag) if tag.name() == "b"));
    assert!(matches!(&nodes[2], Node::Text(text) if text.content() == "u"));
}

#[test]
fn test_issue_messages() {
    let report = HtmlFilter::new().parse_with_report("<blink>x</blink>");
    assert_eq!(
        report.issues[0].to_string(),
        "dropped unknown tag <blink> at byte 0"
    );
    assert_eq!(IssueKind::StrayEndTag.to_string(), "stray-end-tag");
}

// ========== builder state machine ==========

#[test]
fn test_builder_state_transitions() {
    let registry = TagRegistry::default();
    let mut builder = TreeBuilder::new(&registry);
    assert_eq!(builder.state(), &BuilderState::Active);

    builder.process_token(
        Token::StartTag {
            name: "div".to_string(),
            attributes: vec![],
            self_closing: false,
        },
        0,
    );
    assert_eq!(builder.depth(), 1);

    builder.process_token(
        Token::StartTag {
            name: "blink".to_string(),
            attributes: vec![],
            self_closing: false,
        },
        5,
    );
    assert_eq!(
        builder.state(),
        &BuilderState::Skipping {
            name: "blink".to_string(),
            depth: 1
        }
    );
    assert_eq!(builder.state().to_string(), "Skipping");

    builder.process_token(
        Token::EndTag {
            name: "blink".to_string(),
        },
        12,
    );
    assert_eq!(builder.state(), &BuilderState::Active);

    builder.process_token(Token::Malformed, 20);
    assert_eq!(builder.state(), &BuilderState::Halted);

    // Ignored once halted.
    builder.process_token(
        Token::EndTag {
            name: "div".to_string(),
        },
        30,
    );
    let report = builder.finish();
    assert!(report.halted);
    assert!(report.nodes.is_empty());
}
