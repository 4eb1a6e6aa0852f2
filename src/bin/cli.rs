use chrono::{NaiveDate, NaiveTime, Weekday};
use program_tool::{
    CalendarEvent, IcsExporter, OutsidePin, ProgramState, TimeRange, calculate,
    load_program_from_json, save_program_to_json, save_summary_to_csv, weekday_name,
};
use std::io::{self, Write};

fn parse_date_arg(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_time_arg(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn parse_weekday_arg(s: &str) -> Option<Weekday> {
    match s.to_ascii_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

fn print_help() {
    println!("Commands:");
    println!("  show                                  print the current program");
    println!("  range <start> <end>                   set both range anchors (YYYY-MM-DD)");
    println!("  start <date> | end <date>             set one anchor");
    println!("  pick <date>                           two-click range pick");
    println!("  shift <date>                          shift-click range adjustment");
    println!("  day <weekday> on|off                  toggle a weekday in the filter");
    println!("  time <weekday> <start> <end>          assign a weekday schedule (HH:MM)");
    println!("  time <weekday> clear                  remove a weekday schedule");
    println!("  toggle <date>                         flip the per-date exception");
    println!("  on <date> | off <date>                force a date on/off");
    println!("  outside <date>                        toggle the outside-range pin");
    println!("  event <date> <start> <end> [-r] <title...>   add an event");
    println!("  events <date>                         list a date's events");
    println!("  delevent <date> <index>               remove one event");
    println!("  delevents <date>                      remove all events on a date");
    println!("  summary                               print the computed summary");
    println!("  save json <path> | load json <path>");
    println!("  export csv <path> | export ics <path>");
    println!("  quit");
}

fn print_state(state: &ProgramState, pin: &OutsidePin) {
    match (state.start(), state.end()) {
        (Some(a), Some(z)) => println!("Range      : {} .. {}", a, z),
        (Some(a), None) => println!("Range      : {} .. (open)", a),
        _ => println!("Range      : (unset)"),
    }

    let mut days = Vec::new();
    for day in ProgramState::ALL_WEEKDAYS {
        if state.training_days().contains(&day) {
            match state.time_for(day) {
                Some(tr) => days.push(format!(
                    "{} {}-{}",
                    weekday_name(day),
                    format_time(tr.start),
                    format_time(tr.end)
                )),
                None => days.push(weekday_name(day).to_string()),
            }
        }
    }
    println!(
        "Days       : {}",
        if days.is_empty() {
            "(all in range)".to_string()
        } else {
            days.join(", ")
        }
    );

    let on = state
        .forced_on()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let off = state
        .forced_off()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Forced on  : {}", if on.is_empty() { "-".into() } else { on });
    println!("Forced off : {}", if off.is_empty() { "-".into() } else { off });
    if let Some(d) = pin.pinned() {
        println!("Outside pin: {}", d);
    }

    let event_count: usize = state.events().values().map(Vec::len).sum();
    println!("Events     : {}", event_count);
}

fn print_summary(state: &ProgramState) {
    let Some(summary) = calculate(state) else {
        println!("No range defined; nothing to summarize.");
        return;
    };
    println!("Range            : {} .. {}", summary.start, summary.end);
    println!("Selected days    : {}", summary.selected_days);
    println!("Total minutes    : {}", summary.total_minutes);
    println!("Weeks in range   : {}", summary.weeks_in_range);
    println!("Weeks w/ training: {}", summary.weeks_with_training);
    for (month, minutes) in &summary.minutes_by_month {
        println!("  {}  {} min", month, minutes);
    }
    for (week, minutes) in &summary.minutes_by_week {
        println!("  week {}  {} min", week, minutes);
    }
}

fn main() {
    let mut state = ProgramState::new();
    let mut pin = OutsidePin::new();

    println!("Training Program Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_state(&state, &pin),
            "range" => match (
                parts.next().and_then(parse_date_arg),
                parts.next().and_then(parse_date_arg),
            ) {
                (Some(a), Some(z)) => {
                    state.set_range(a, z);
                    println!("Range set.");
                }
                _ => println!("Usage: range <start> <end> (YYYY-MM-DD)"),
            },
            "start" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    state.set_start(d);
                    println!("Start anchor set to {}.", d);
                }
                None => println!("Usage: start <date>"),
            },
            "end" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    state.set_end(d);
                    println!("End anchor set to {}.", d);
                }
                None => println!("Usage: end <date>"),
            },
            "pick" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    state.close_range_at(d);
                    print_state(&state, &pin);
                }
                None => println!("Usage: pick <date>"),
            },
            "shift" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    state.adjust_range_with(d);
                    print_state(&state, &pin);
                }
                None => println!("Usage: shift <date>"),
            },
            "day" => {
                let day = parts.next().and_then(parse_weekday_arg);
                let flag = parts.next();
                match (day, flag) {
                    (Some(day), Some("on")) => {
                        state.set_training_day(day, true);
                        println!("{} activated.", weekday_name(day));
                    }
                    (Some(day), Some("off")) => {
                        state.set_training_day(day, false);
                        println!("{} deactivated.", weekday_name(day));
                    }
                    _ => println!("Usage: day <weekday> on|off"),
                }
            }
            "time" => {
                let day = parts.next().and_then(parse_weekday_arg);
                let first = parts.next();
                match (day, first) {
                    (Some(day), Some("clear")) => {
                        state.clear_time_for(day);
                        println!("Schedule cleared for {}.", weekday_name(day));
                    }
                    (Some(day), Some(start_s)) => {
                        match (parse_time_arg(start_s), parts.next().and_then(parse_time_arg)) {
                            (Some(start), Some(end)) => {
                                state.set_time_for(day, TimeRange::new(start, end));
                                println!(
                                    "Schedule for {}: {}-{} ({} min).",
                                    weekday_name(day),
                                    format_time(start),
                                    format_time(end),
                                    TimeRange::new(start, end).minutes()
                                );
                            }
                            _ => println!("Usage: time <weekday> <start> <end> (HH:MM)"),
                        }
                    }
                    _ => println!("Usage: time <weekday> <start> <end> | time <weekday> clear"),
                }
            }
            "toggle" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    state.toggle_exception(d);
                    println!(
                        "{} is now {}.",
                        d,
                        if state.is_selected(d) { "selected" } else { "unselected" }
                    );
                }
                None => println!("Usage: toggle <date>"),
            },
            "on" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    state.force_on(d);
                    println!("{} forced on.", d);
                }
                None => println!("Usage: on <date>"),
            },
            "off" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    state.force_off(d);
                    println!("{} forced off.", d);
                }
                None => println!("Usage: off <date>"),
            },
            "outside" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    if state.is_inside_range(d) {
                        println!("{} is inside the range; outside pin ignored.", d);
                    } else {
                        pin.toggle(&mut state, d);
                        match pin.pinned() {
                            Some(p) => println!("Outside pin: {}.", p),
                            None => println!("Outside pin cleared."),
                        }
                    }
                }
                None => println!("Usage: outside <date>"),
            },
            "event" => {
                let date = parts.next().and_then(parse_date_arg);
                let start = parts.next().and_then(parse_time_arg);
                let end = parts.next().and_then(parse_time_arg);
                let rest: Vec<&str> = parts.collect();
                let (reminder, title_parts) = match rest.split_first() {
                    Some((&"-r", tail)) => (true, tail),
                    _ => (false, rest.as_slice()),
                };
                match (date, start, end) {
                    (Some(date), Some(start), Some(end)) if !title_parts.is_empty() => {
                        let title = title_parts.join(" ");
                        state.add_event(
                            date,
                            CalendarEvent::new(
                                title.clone(),
                                "",
                                "",
                                TimeRange::new(start, end),
                                reminder,
                            ),
                        );
                        println!("Event '{}' added on {}.", title, date);
                    }
                    _ => println!("Usage: event <date> <start> <end> [-r] <title...>"),
                }
            }
            "events" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    let list = state.events_on(d);
                    if list.is_empty() {
                        println!("No events on {}.", d);
                    }
                    for (i, ev) in list.iter().enumerate() {
                        println!(
                            "{}: {} {}-{}{}",
                            i,
                            ev.title,
                            format_time(ev.time.start),
                            format_time(ev.time.end),
                            if ev.reminder { " (reminder)" } else { "" }
                        );
                    }
                }
                None => println!("Usage: events <date>"),
            },
            "delevent" => {
                let date = parts.next().and_then(parse_date_arg);
                let index = parts.next().and_then(|s| s.parse::<usize>().ok());
                match (date, index) {
                    (Some(d), Some(i)) => match state.remove_event(d, i) {
                        Some(ev) => println!("Removed '{}' from {}.", ev.title, d),
                        None => println!("No event {} on {}.", i, d),
                    },
                    _ => println!("Usage: delevent <date> <index>"),
                }
            }
            "delevents" => match parts.next().and_then(parse_date_arg) {
                Some(d) => {
                    state.clear_events(d);
                    println!("Events cleared on {}.", d);
                }
                None => println!("Usage: delevents <date>"),
            },
            "summary" => print_summary(&state),
            "save" => match (parts.next(), parts.next()) {
                (Some("json"), Some(path)) => match save_program_to_json(&state, path) {
                    Ok(()) => println!("Program saved to {}.", path),
                    Err(e) => println!("Error saving program: {}", e),
                },
                _ => println!("Usage: save json <path>"),
            },
            "load" => match (parts.next(), parts.next()) {
                (Some("json"), Some(path)) => match load_program_from_json(path) {
                    Ok(loaded) => {
                        state.copy_from(&loaded);
                        pin = OutsidePin::new();
                        println!("Program loaded from {}.", path);
                        print_state(&state, &pin);
                    }
                    Err(e) => println!("Error loading program: {}", e),
                },
                _ => println!("Usage: load json <path>"),
            },
            "export" => match (parts.next(), parts.next()) {
                (Some("csv"), Some(path)) => match save_summary_to_csv(&state, path) {
                    Ok(()) => println!("Summary exported to {}.", path),
                    Err(e) => println!("Error exporting summary: {}", e),
                },
                (Some("ics"), Some(path)) => {
                    match IcsExporter::default().export_to_path(&state, path) {
                        Ok(()) => println!("Calendar exported to {}.", path),
                        Err(e) => println!("Error exporting calendar: {}", e),
                    }
                }
                _ => println!("Usage: export csv <path> | export ics <path>"),
            },
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }
}
