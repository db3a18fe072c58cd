use crossterm::style::Stylize;

use super::model::{Field, PanelState};

#[derive(Debug, Clone, Copy)]
pub struct UiOpts {
    pub plain: bool,
    pub ascii_only: bool,
}

pub fn render_panel(state: &PanelState, opts: &UiOpts, term_w: u16) -> String {
    let width = term_w as usize;
    let mut lines = Vec::new();

    lines.push(center_line("PINGDECK", width));
    lines.push(center_line("network probe panel", width));
    lines.push(String::new());

    lines.push(format!("protocol: {}", protocol_row(state)));
    lines.push(field_line(
        "host",
        &state.host,
        state.focus == Field::Host,
        true,
        opts,
    ));
    lines.push(field_line(
        "port",
        &state.port,
        state.focus == Field::Port,
        state.port_editable(),
        opts,
    ));
    lines.push(String::new());

    let trigger = if state.can_trigger() {
        "[ Trigger Ping (enter) ]".to_string()
    } else {
        dim("( Trigger Ping needs a valid host/port )", opts)
    };
    lines.push(format!(
        "{trigger}   [ Check {} (ctrl-s) ]",
        state.status_path
    ));

    if state.in_flight > 0 {
        lines.push(format!("{} call(s) in flight", state.in_flight));
    }
    lines.push(String::new());

    let rule = if opts.ascii_only { "-" } else { "─" };
    lines.push(rule.repeat(width.clamp(10, 60)));

    match &state.result {
        Some(result) => lines.extend(result.lines().map(|line| line.to_string())),
        None => lines.push(dim("(no result yet)", opts)),
    }
    lines.push(String::new());

    match &state.last_event {
        Some(event) => lines.push(event.clone()),
        None => lines.push("Last call: (none)".to_string()),
    }
    lines.push(dim(
        "tab: switch field   left/right: protocol   esc: quit",
        opts,
    ));

    lines.join("\n")
}

fn protocol_row(state: &PanelState) -> String {
    pingdeck_model::Protocol::ALL
        .iter()
        .map(|protocol| {
            if *protocol == state.protocol {
                format!("[{protocol}]")
            } else {
                format!(" {protocol} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn field_line(label: &str, value: &str, focused: bool, editable: bool, opts: &UiOpts) -> String {
    let marker = if focused { '>' } else { ' ' };
    let text = format!("{marker} {label}: {value}");
    if editable {
        text
    } else {
        dim(&format!("{text}  (tcp only)"), opts)
    }
}

fn dim(text: &str, opts: &UiOpts) -> String {
    if opts.plain {
        text.to_string()
    } else {
        text.dim().to_string()
    }
}

fn center_line(text: &str, width: usize) -> String {
    if text.len() >= width {
        return text.to_string();
    }
    let pad = (width - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}
