use super::*;

#[test]
fn escaped_utility_class_selectors_match() -> Result<()> {
    let html = r#"
        <div id='panel' class='bg-white/70 md:flex'>panel</div>
        "#;

    let page = Page::from_html(html)?;
    page.assert_exists(r".bg-white\/70")?;
    page.assert_exists(r".md\:flex")?;
    page.assert_text(r"div.bg-white\/70", "panel")?;
    Ok(())
}

#[test]
fn child_and_descendant_chain_backtracks_to_outer_ancestor() -> Result<()> {
    let html = r#"
        <div class='a'>
          <div class='b'>
            <div class='b'>
              <span id='target' class='c'>x</span>
            </div>
          </div>
        </div>
        "#;

    let page = Page::from_html(html)?;
    page.assert_text(".a > .b .c", "x")?;
    assert!(matches!(
        page.assert_exists(".a > .c"),
        Err(Error::SelectorNotFound(_))
    ));
    Ok(())
}

#[test]
fn sibling_attribute_and_pseudo_selectors_match() -> Result<()> {
    let html = r#"
        <section>
          <h2 id='title'>Title</h2>
          <p id='first'>one</p>
          <p id='second' data-role='alert-item'>two</p>
        </section>
        <input id='on' type='checkbox' checked>
        <input id='off' type='checkbox' disabled>
        "#;

    let page = Page::from_html(html)?;
    page.assert_text("h2 + p", "one")?;
    page.assert_text("h2 ~ p[data-role]", "two")?;
    page.assert_text("[data-role^=alert]", "two")?;
    page.assert_text("[data-role|=alert]", "two")?;
    page.assert_text("section > :first-child", "Title")?;
    page.assert_text("section p:last-child", "two")?;
    page.assert_text("p:not([data-role])", "one")?;
    assert_eq!(page.attr("input:checked", "id")?.as_deref(), Some("on"));
    assert_eq!(page.attr("input:disabled", "id")?.as_deref(), Some("off"));
    assert_eq!(page.attr("input:enabled", "id")?.as_deref(), Some("on"));
    Ok(())
}

#[test]
fn selector_lists_return_first_match_in_document_order() -> Result<()> {
    let html = r#"
        <p id='a' class='late'>a</p>
        <p id='b' class='early'>b</p>
        "#;

    let page = Page::from_html(html)?;
    page.assert_text(".early, .late", "a")?;
    Ok(())
}

#[test]
fn malformed_selectors_are_rejected() -> Result<()> {
    let page = Page::from_html("<p id='a'>a</p>")?;
    assert!(matches!(
        page.assert_exists("p >"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        page.assert_exists(""),
        Err(Error::UnsupportedSelector(_))
    ));
    Ok(())
}

#[test]
fn inner_text_skips_hidden_and_raw_text_content() -> Result<()> {
    let html = r#"<div id='src'>abc-<span hidden>x</span><span class='hidden'>y</span><span style='display: none'>z</span><script>var s = 1;</script><style>p { color: red; }</style>123</div>"#;

    let page = Page::from_html(html)?;
    assert_eq!(page.inner_text("#src")?, "abc-123");
    assert_eq!(
        page.text("#src")?,
        "abc-xyzvar s = 1;p { color: red; }123"
    );
    Ok(())
}

#[test]
fn displayed_state_follows_hidden_ancestors() -> Result<()> {
    let html = r#"
        <div id='outer' class='hidden'><p id='inner'>x</p></div>
        <div id='styled' style='display:none'></div>
        <div id='attr' hidden></div>
        <div id='shown' style='opacity: 0'></div>
        "#;

    let page = Page::from_html(html)?;
    page.assert_displayed("#inner", false)?;
    page.assert_displayed("#styled", false)?;
    page.assert_displayed("#attr", false)?;
    page.assert_displayed("#shown", true)?;
    Ok(())
}

#[test]
fn form_controls_take_initial_values_from_markup() -> Result<()> {
    let html = r#"
        <select id='plain'><option>  First   choice </option><option>Second</option></select>
        <select id='chosen'><option value='a'>A</option><option value='b' selected>B</option></select>
        <textarea id='notes'>line one</textarea>
        <input id='empty'>
        "#;

    let page = Page::from_html(html)?;
    page.assert_value("#plain", "First choice")?;
    page.assert_value("#chosen", "b")?;
    page.assert_value("#notes", "line one")?;
    page.assert_value("#empty", "")?;
    Ok(())
}

#[test]
fn duplicate_ids_resolve_to_first_element() -> Result<()> {
    let html = r#"
        <p id='dup'>first</p>
        <p id='dup'>second</p>
        "#;

    let page = Page::from_html(html)?;
    page.assert_text("#dup", "first")?;
    Ok(())
}

#[test]
fn style_accessors_accept_camel_case_and_remove_empty_values() -> Result<()> {
    let mut page = Page::from_html("<div id='box' style='max-height: 0; opacity: 0'></div>")?;
    assert_eq!(page.style("#box", "maxHeight")?, "0");
    page.show_container("#box")?;
    assert_eq!(page.style("#box", "display")?, "");
    assert_eq!(
        page.attr("#box", "style")?.as_deref(),
        Some(
            "max-height: 0; opacity: 0; transition: max-height 0.5s ease, opacity 0.5s ease, transform 0.5s ease; overflow: hidden;"
        )
    );
    Ok(())
}

#[test]
fn dump_dom_serializes_sorted_attributes_and_void_tags() -> Result<()> {
    let page = Page::from_html("<div id='d' class='x'><input type='text' id='i'><br>a &amp; b</div>")?;
    assert_eq!(
        page.dump_dom("#d")?,
        "<div class=\"x\" id=\"d\"><input id=\"i\" type=\"text\"><br>a &amp; b</div>"
    );
    Ok(())
}

#[test]
fn dump_dom_escapes_attribute_quotes_and_keeps_style_text_raw() -> Result<()> {
    let page = Page::from_html(
        "<section id='s' title='say \"hi\" &amp; go'><style>a > b { }</style><p>1 &lt; 2</p></section>",
    )?;
    assert_eq!(
        page.dump_dom("#s")?,
        "<section id=\"s\" title=\"say &quot;hi&quot; &amp; go\"><style>a > b { }</style><p>1 &lt; 2</p></section>"
    );
    Ok(())
}

#[test]
fn assertion_snippets_are_cut_at_two_hundred_chars() -> Result<()> {
    let long = "ñ".repeat(300);
    let page = Page::from_html(&format!("<p id='p'>{long}</p>"))?;
    match page.assert_text("#p", "short") {
        Err(Error::AssertionFailed { dom_snippet, .. }) => {
            assert!(dom_snippet.ends_with("..."), "{dom_snippet}");
            assert_eq!(dom_snippet.chars().count(), 203);
            assert!(dom_snippet.starts_with("<p id=\"p\">ñ"));
        }
        other => panic!("expected assertion failure, got: {other:?}"),
    }

    let page = Page::from_html("<p id='p'>x</p>")?;
    match page.assert_text("#p", "y") {
        Err(Error::AssertionFailed { dom_snippet, .. }) => {
            assert_eq!(dom_snippet, "<p id=\"p\">x</p>");
        }
        other => panic!("expected assertion failure, got: {other:?}"),
    }
    Ok(())
}

#[test]
fn html_parse_errors_surface_from_page_construction() {
    assert!(matches!(
        Page::from_html("<div><!-- open"),
        Err(Error::HtmlParse(_))
    ));
    assert!(matches!(
        Page::from_html("<div id='x"),
        Err(Error::HtmlParse(_))
    ));
}
