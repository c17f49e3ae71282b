use wall_core::{Effect, WallViewModel};

/// One-line summary of the wall, printed whenever the state changed.
pub fn status_line(view: &WallViewModel) -> String {
    let state = if view.active {
        "running".to_string()
    } else {
        let reasons: Vec<&str> = view.flags.iter().map(|flag| flag.label()).collect();
        format!("halted ({})", reasons.join(","))
    };
    let controls: Vec<String> = view
        .controls
        .iter()
        .map(|control| {
            let mark = if control.enabled { "" } else { "*" };
            format!("{}{}", control.channel.path(), mark)
        })
        .collect();

    format!(
        "[{state}] every {}s{}{} | {}/{} images | {}",
        view.poll_interval_seconds,
        if view.play_in_background { " +bg" } else { "" },
        if view.polling { " | polling" } else { "" },
        view.images.len(),
        view.image_capacity,
        controls.join(" "),
    )
}

/// Text for effects that change what is on screen.
pub fn describe_effect(effect: &Effect) -> Option<String> {
    match effect {
        Effect::AttachImage { image } => Some(format!(
            "+ #{} [{}] {}  ({})",
            image.id, image.crawler_tag, image.uri, image.source_label
        )),
        Effect::DetachImage { id } => Some(format!("- #{id}")),
        Effect::SetPageClass { class, present } => Some(format!(
            "{} {}",
            if *present { "on " } else { "off" },
            class.name()
        )),
        _ => None,
    }
}
