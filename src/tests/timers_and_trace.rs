use super::*;

const CARDS_HTML: &str = r#"
    <p class='card' id='c1'>1</p>
    <p class='card' id='c2'>2</p>
    <p class='card' id='c3'>3</p>
    <p class='card' id='c4'>4</p>
    "#;

#[test]
fn clock_only_moves_forward() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    page.advance_time(250)?;
    assert_eq!(page.now_ms(), 250);

    assert!(matches!(page.advance_time(-1), Err(Error::Runtime(_))));
    assert!(matches!(page.advance_time_to(249), Err(Error::Runtime(_))));
    assert_eq!(page.now_ms(), 250);

    page.advance_time_to(250)?;
    page.advance_time_to(1000)?;
    assert_eq!(page.now_ms(), 1000);
    Ok(())
}

#[test]
fn flush_moves_the_clock_to_the_last_timer() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    page.init_fade_in(".card", 300)?;

    page.flush()?;
    assert_eq!(page.now_ms(), 900);
    assert!(page.pending_timers().is_empty());
    page.assert_class("#c4", FADE_IN_CLASS, true)?;

    page.flush()?;
    assert_eq!(page.now_ms(), 900);
    Ok(())
}

#[test]
fn run_next_timer_runs_one_timer_at_a_time() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    page.init_fade_in(".card", 100)?;

    assert!(page.run_next_timer()?);
    assert!(page.run_next_timer()?);
    assert_eq!(page.now_ms(), 100);
    page.assert_class("#c2", FADE_IN_CLASS, true)?;
    page.assert_class("#c3", FADE_IN_CLASS, false)?;

    page.flush()?;
    assert!(!page.run_next_timer()?);
    assert_eq!(page.now_ms(), 300);
    Ok(())
}

#[test]
fn run_due_timers_leaves_future_timers_alone() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    page.init_fade_in(".card", 100)?;

    assert_eq!(page.run_due_timers()?, 1);
    assert_eq!(page.run_due_timers()?, 0);
    assert_eq!(page.pending_timers().len(), 3);
    assert_eq!(page.now_ms(), 0);
    Ok(())
}

#[test]
fn cleared_timers_never_run() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    page.init_fade_in(".card", 100)?;

    let third = page.pending_timers()[2].id;
    assert!(page.clear_timer(third));
    assert!(!page.clear_timer(third));
    assert!(!page.clear_timer(9999));

    page.flush()?;
    page.assert_class("#c3", FADE_IN_CLASS, false)?;
    page.assert_class("#c4", FADE_IN_CLASS, true)?;
    Ok(())
}

#[test]
fn timers_due_together_run_in_scheduling_order() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    page.init_fade_in("#c3", 0)?;
    page.init_fade_in("#c1", 0)?;
    page.init_fade_in("#c2", 0)?;

    let timers = page.pending_timers();
    assert!(timers.iter().all(|timer| timer.due_at == 0));
    assert!(timers.windows(2).all(|pair| pair[0].order < pair[1].order));

    page.enable_trace(true);
    page.run_due_timers()?;
    let run_ids = page
        .take_trace_logs()
        .into_iter()
        .filter(|line| line.starts_with("[timer] run id="))
        .collect::<Vec<_>>();
    assert_eq!(run_ids.len(), 3);
    for (line, timer) in run_ids.iter().zip(&timers) {
        assert!(line.starts_with(&format!("[timer] run id={} ", timer.id)), "{line}");
    }
    Ok(())
}

#[test]
fn step_limit_stops_runaway_queues() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    assert!(matches!(page.set_timer_step_limit(0), Err(Error::Runtime(_))));

    page.set_timer_step_limit(3)?;
    page.init_fade_in(".card", 10)?;
    match page.flush() {
        Err(Error::Runtime(message)) => {
            assert!(
                message.starts_with("timer queue exceeded max task steps: limit=3, steps=4"),
                "{message}"
            );
            assert!(message.contains("label=fade-in"), "{message}");
        }
        other => panic!("expected step limit error, got: {other:?}"),
    }
    Ok(())
}

#[test]
fn trace_records_schedule_run_and_clear_lines() -> Result<()> {
    let mut page = Page::from_html("<div id='box'>x</div>")?;
    page.enable_trace(true);

    page.hide_container("#box")?;
    page.show_container("#box")?;
    page.advance_time(10)?;

    let logs = page.take_trace_logs();
    assert_eq!(
        logs,
        vec![
            "[timer] schedule id=1 due_at=500 label=visibility.hide delay_ms=500".to_string(),
            "[timer] clear id=1 label=visibility.hide".to_string(),
            "[animation] supersede visibility target=#box cancelled=1".to_string(),
            "[timer] schedule id=2 due_at=10 label=visibility.show delay_ms=10".to_string(),
            "[timer] schedule id=3 due_at=1010 label=visibility.highlight-end delay_ms=1010"
                .to_string(),
            "[timer] run id=2 due_at=10 label=visibility.show now_ms=10".to_string(),
            "[timer] advance delta_ms=10 from=0 to=10 ran_due=1".to_string(),
        ]
    );
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn trace_channels_and_limit_are_configurable() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    page.init_confirm_button("#c1", "ok?")?;
    page.enable_trace(true);

    page.set_trace_timers(false);
    page.init_fade_in(".card", 0)?;
    page.click("#c1")?;
    let logs = page.take_trace_logs();
    assert!(logs.iter().all(|line| !line.starts_with("[timer]")), "{logs:?}");
    assert!(logs.iter().any(|line| line.starts_with("[event] click")));
    assert!(logs.contains(&"[dialog] confirm accepted=false".to_string()));

    page.set_trace_timers(true);
    page.set_trace_events(false);
    page.click("#c1")?;
    page.flush()?;
    let logs = page.take_trace_logs();
    assert!(logs.iter().all(|line| line.starts_with("[timer]")), "{logs:?}");

    assert!(matches!(page.set_trace_log_limit(0), Err(Error::Runtime(_))));
    page.set_trace_log_limit(2)?;
    page.init_fade_in(".card", 5)?;
    let logs = page.take_trace_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[1].contains("due_at=")
        && logs[1].ends_with("delay_ms=15"), "{logs:?}");
    Ok(())
}

#[test]
fn disabled_trace_records_nothing() -> Result<()> {
    let mut page = Page::from_html(CARDS_HTML)?;
    page.init_fade_in(".card", 10)?;
    page.flush()?;
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}
