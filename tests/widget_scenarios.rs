use page_widgets::{
    AlertsCollapseConfig, AlertsView, DEFAULT_COPY_ERROR_PREFIX, Error, FADE_IN_CLASS,
    FormSubmission, Navigation, Page, Result, ToggleFieldsConfig,
};

const PAYMENT_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head>
  <title>Cobranzas</title>
  <style>.hidden { display: none; }</style>
</head>
<body>
  <div id="alerts-container">
    <div id="alerts-expanded-view" class="bg-white/70">
      <p class="alert-item">Factura 0001-00012 vencida</p>
      <p class="alert-item">Cheque 4411 rechazado</p>
    </div>
    <div id="alerts-collapsed-bar" class="hidden">2 alertas pendientes</div>
  </div>

  <form id="payment-form" action="/cobranzas/registrar">
    <div class="field" id="method-field">
      <label for="method">Medio de pago</label>
      <select id="method" name="method">
        <option value="efectivo">Efectivo</option>
        <option value="bono">Bono</option>
        <option value="transferencia">Transferencia</option>
      </select>
    </div>
    <div class="field" id="serial-field">
      <label for="bono-serial">Serie</label>
      <input id="bono-serial" name="bono_serial" value="B-77">
    </div>
    <div class="field" id="issuer-field">
      <label for="bono-issuer">Emisor</label>
      <input id="bono-issuer" name="bono_issuer">
    </div>
    <button id="save" class="confirm-save">Registrar</button>
  </form>

  <div id="cbu-card">
    <span id="cbu">0110599520000001234567</span>
    <button id="copy-cbu" type="button">Copiar CBU</button>
  </div>

  <ul id="history">
    <li class="history-row">Pago 1</li>
    <li class="history-row">Pago 2</li>
    <li class="history-row">Pago 3</li>
  </ul>
  <a id="back" class="confirm-save" href="/cobranzas">Volver</a>
</body>
</html>
"#;

fn bono_fields() -> ToggleFieldsConfig {
    ToggleFieldsConfig::new("method", |method, _| method == "BONO")
        .dependents(["bono-serial", "bono-issuer"])
        .container_selector(".field")
}

#[test]
fn payment_page_wires_every_widget() -> Result<()> {
    let mut page = Page::from_html(PAYMENT_PAGE)?;

    let alerts = page
        .init_alerts_collapse(AlertsCollapseConfig::default())?
        .ok_or_else(|| Error::Runtime("alerts not bound".into()))?;
    let toggle = page
        .init_toggle_fields(bono_fields())?
        .ok_or_else(|| Error::Runtime("toggle not bound".into()))?;
    assert_eq!(page.init_confirm_button(".confirm-save", "¿Confirmar?")?, 2);
    assert!(page.init_copy_to_clipboard("copy-cbu", "cbu", "CBU copiado", None));
    assert_eq!(page.init_fade_in(".history-row", 200)?, 3);

    // Bono fields start hidden and disabled.
    assert!(!page.toggle_decision(toggle)?);
    page.assert_disabled("#bono-serial", true)?;
    page.advance_time(500)?;
    page.assert_displayed("#serial-field", false)?;
    page.assert_displayed("#issuer-field", false)?;
    page.assert_class(".history-row", FADE_IN_CLASS, true)?;

    // Picking "bono" reveals the fields and flashes the select's field.
    page.select_option("#method", "bono")?;
    page.assert_disabled("#bono-serial", false)?;
    page.assert_disabled("#bono-issuer", false)?;
    page.assert_class("#method-field", "bg-blue-50", true)?;
    page.advance_time(10)?;
    page.assert_style("#serial-field", "opacity", "1")?;
    page.assert_class("#serial-field", "bg-yellow-50", true)?;

    page.type_text("#bono-issuer", "Provincia")?;

    // Copy the CBU.
    page.click("#copy-cbu")?;
    assert_eq!(page.clipboard_text(), "0110599520000001234567");
    assert_eq!(page.take_alert_messages(), vec!["CBU copiado".to_string()]);

    // Declined then accepted submission.
    page.enqueue_confirm_response(false);
    page.click("#save")?;
    assert!(page.take_form_submissions().is_empty());
    page.enqueue_confirm_response(true);
    page.click("#save")?;
    assert_eq!(
        page.take_form_submissions(),
        vec![FormSubmission {
            form_id: Some("payment-form".into()),
            action: "/cobranzas/registrar".into(),
            submitter_id: Some("save".into()),
        }]
    );
    page.assert_value("#bono-issuer", "Provincia")?;

    // Alerts collapse on their own at 5000 ms.
    page.advance_time_to(5400)?;
    assert_eq!(page.alerts_view(alerts)?, AlertsView::Collapsed);
    page.assert_displayed("#alerts-collapsed-bar", true)?;
    page.assert_displayed("#alerts-expanded-view", false)?;
    page.assert_class("#serial-field", "bg-yellow-50", false)?;

    page.click("#alerts-collapsed-bar")?;
    page.advance_time(250)?;
    assert_eq!(page.alerts_view(alerts)?, AlertsView::Expanded);
    page.assert_style("#alerts-expanded-view", "max-height", "500px")?;

    page.set_default_confirm_response(true);
    page.click("#back")?;
    assert_eq!(
        page.take_navigations(),
        vec![Navigation {
            href: "/cobranzas".into()
        }]
    );
    Ok(())
}

#[test]
fn switching_away_from_bono_hides_and_disables_again() -> Result<()> {
    let mut page = Page::from_html(PAYMENT_PAGE)?;
    let toggle = page
        .init_toggle_fields(bono_fields())?
        .ok_or_else(|| Error::Runtime("toggle not bound".into()))?;

    page.select_option("#method", "bono")?;
    page.advance_time(300)?;
    page.select_option("#method", "transferencia")?;
    assert!(!page.toggle_decision(toggle)?);
    page.assert_disabled("#bono-serial", true)?;
    page.assert_class("#serial-field", "bg-yellow-50", false)?;
    page.assert_value("#bono-serial", "B-77")?;

    page.advance_time(499)?;
    page.assert_displayed("#serial-field", true)?;
    page.advance_time(1)?;
    page.assert_displayed("#serial-field", false)?;

    page.flush()?;
    page.assert_class("#method-field", "bg-blue-50", false)?;
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn copy_failure_is_reported_through_an_alert() -> Result<()> {
    let mut page = Page::from_html(PAYMENT_PAGE)?;
    page.init_copy_to_clipboard("copy-cbu", "cbu", "CBU copiado", None);
    page.set_clipboard_failure(Some("Document is not focused."));

    page.click("#copy-cbu")?;
    assert_eq!(
        page.take_alert_messages(),
        vec![format!("{DEFAULT_COPY_ERROR_PREFIX}Document is not focused.")]
    );
    assert_eq!(page.clipboard_text(), "");
    Ok(())
}

#[test]
fn widgets_on_a_bare_page_are_no_ops() -> Result<()> {
    let mut page = Page::from_html("<main><p id='empty'>Sin datos</p></main>")?;

    assert_eq!(page.init_alerts_collapse(AlertsCollapseConfig::default())?, None);
    assert_eq!(page.init_toggle_fields(bono_fields())?, None);
    assert_eq!(page.init_confirm_button(".confirm-save", "?")?, 0);
    assert!(!page.init_copy_to_clipboard("copy-cbu", "cbu", "ok", None));
    assert_eq!(page.init_fade_in(".history-row", 200)?, 0);

    assert!(page.pending_timers().is_empty());
    page.flush()?;
    assert_eq!(page.now_ms(), 0);
    Ok(())
}

#[test]
fn hovering_the_alerts_keeps_them_open() -> Result<()> {
    let mut page = Page::from_html(PAYMENT_PAGE)?;
    let alerts = page
        .init_alerts_collapse(AlertsCollapseConfig::default())?
        .ok_or_else(|| Error::Runtime("alerts not bound".into()))?;

    page.advance_time(4500)?;
    page.pointer_enter("#alerts-expanded-view")?;
    page.advance_time(60_000)?;
    assert_eq!(page.alerts_view(alerts)?, AlertsView::Expanded);

    page.pointer_leave("#alerts-expanded-view")?;
    page.advance_time(4999)?;
    assert_eq!(page.alerts_view(alerts)?, AlertsView::Expanded);
    page.advance_time(1)?;
    assert_eq!(page.alerts_view(alerts)?, AlertsView::Collapsed);
    Ok(())
}
