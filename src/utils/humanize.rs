use chrono::{DateTime, Utc};

/// Humanized elapsed time since `from`, in Portuguese ("há 3 dias").
pub fn elapsed_since(from: DateTime<Utc>) -> String {
    elapsed_between(from, Utc::now())
}

pub fn elapsed_between(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let seconds = (to - from).num_seconds().max(0);

    if seconds < 60 {
        return "agora mesmo".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("há {} {}", minutes, plural(minutes, "minuto", "minutos"));
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("há {} {}", hours, plural(hours, "hora", "horas"));
    }

    let days = hours / 24;
    if days < 30 {
        return format!("há {} {}", days, plural(days, "dia", "dias"));
    }

    let months = days / 30;
    if months < 12 {
        return format!("há {} {}", months, plural(months, "mês", "meses"));
    }

    let years = months / 12;
    format!("há {} {}", years, plural(years, "ano", "anos"))
}

fn plural<'a>(count: i64, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
