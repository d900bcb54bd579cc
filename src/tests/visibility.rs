use super::*;

const TRANSITION: &str = "max-height 0.5s ease, opacity 0.5s ease, transform 0.5s ease";

#[test]
fn show_clears_display_then_reveals_after_one_tick() -> Result<()> {
    let mut page = Page::from_html("<div id='box' style='display: none'>x</div>")?;
    page.assert_displayed("#box", false)?;

    page.show_container("#box")?;
    page.assert_displayed("#box", true)?;
    page.assert_style("#box", "transition", TRANSITION)?;
    page.assert_style("#box", "overflow", "hidden")?;
    page.assert_style("#box", "opacity", "")?;

    page.advance_time(9)?;
    page.assert_style("#box", "opacity", "")?;

    page.advance_time(1)?;
    page.assert_style("#box", "max-height", "100px")?;
    page.assert_style("#box", "opacity", "1")?;
    page.assert_style("#box", "transform", "translateY(0)")?;
    page.assert_class("#box", "bg-yellow-50", true)?;

    page.advance_time(999)?;
    page.assert_class("#box", "bg-yellow-50", true)?;
    page.advance_time(1)?;
    page.assert_class("#box", "bg-yellow-50", false)?;
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn hide_collapses_immediately_and_drops_display_after_duration() -> Result<()> {
    let mut page = Page::from_html("<div id='box'>x</div>")?;

    page.hide_container("#box")?;
    page.assert_style("#box", "transition", TRANSITION)?;
    page.assert_style("#box", "max-height", "0")?;
    page.assert_style("#box", "opacity", "0")?;
    page.assert_style("#box", "transform", "translateY(-10px)")?;
    page.assert_displayed("#box", true)?;

    page.advance_time(499)?;
    page.assert_displayed("#box", true)?;
    page.advance_time(1)?;
    page.assert_style("#box", "display", "none")?;
    page.assert_displayed("#box", false)?;
    Ok(())
}

#[test]
fn show_during_hide_cancels_pending_display_none() -> Result<()> {
    let mut page = Page::from_html("<div id='box'>x</div>")?;

    page.hide_container("#box")?;
    page.advance_time(200)?;
    page.show_container("#box")?;
    page.advance_time(400)?;

    page.assert_displayed("#box", true)?;
    page.assert_style("#box", "opacity", "1")?;
    page.assert_style("#box", "display", "")?;
    Ok(())
}

#[test]
fn hide_during_show_removes_transient_highlight() -> Result<()> {
    let mut page = Page::from_html("<div id='box' class='card'>x</div>")?;

    page.show_container("#box")?;
    page.advance_time(10)?;
    page.assert_class("#box", "bg-yellow-50", true)?;

    page.hide_container("#box")?;
    page.assert_class("#box", "bg-yellow-50", false)?;
    page.assert_class("#box", "card", true)?;

    page.advance_time(500)?;
    page.assert_displayed("#box", false)?;
    assert!(page.pending_timers().is_empty());

    page.flush()?;
    page.assert_class("#box", "bg-yellow-50", false)?;
    Ok(())
}

#[test]
fn rapid_toggling_settles_on_last_request() -> Result<()> {
    let mut page = Page::from_html("<div id='box'>x</div>")?;

    for _ in 0..5 {
        page.hide_container("#box")?;
        page.advance_time(3)?;
        page.show_container("#box")?;
        page.advance_time(3)?;
    }
    page.hide_container("#box")?;
    page.flush()?;

    page.assert_displayed("#box", false)?;
    page.assert_style("#box", "opacity", "0")?;
    page.assert_class("#box", "bg-yellow-50", false)?;
    Ok(())
}

#[test]
fn default_animation_values() {
    let animation = VisibilityAnimation::default();
    assert_eq!(animation.duration_ms, 500);
    assert_eq!(animation.reveal_delay_ms, 10);
    assert_eq!(animation.expanded_max_height, "100px");
    assert_eq!(animation.hidden_transform, "translateY(-10px)");
    assert_eq!(animation.highlight_class, "bg-yellow-50");
    assert_eq!(animation.highlight_ms, 1000);
    assert_eq!(animation.transition_value(), TRANSITION);
}

#[test]
fn hide_before_reveal_keeps_a_highlight_class_from_the_markup() -> Result<()> {
    let mut page = Page::from_html("<div id='box' class='bg-yellow-50'>x</div>")?;

    page.show_container("#box")?;
    page.advance_time(5)?;
    page.hide_container("#box")?;
    page.flush()?;
    page.assert_class("#box", "bg-yellow-50", true)?;
    page.assert_displayed("#box", false)?;
    Ok(())
}

#[test]
fn hide_after_reveal_strips_the_highlight_it_added() -> Result<()> {
    let mut page = Page::from_html("<div id='box'>x</div>")?;

    page.show_container("#box")?;
    page.advance_time(10)?;
    page.assert_class("#box", "bg-yellow-50", true)?;
    page.hide_container("#box")?;
    page.assert_class("#box", "bg-yellow-50", false)?;
    Ok(())
}
