use common::MetricsSnapshot;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub metrics: Option<MetricsSnapshot>,
}

fn stat(title: &str, id: &str, value: String, desc: &str) -> Html {
    html! {
        <div class="stats shadow bg-base-100">
            <div class="stat">
                <div class="stat-title">{title.to_string()}</div>
                <div class="stat-value text-primary" id={id.to_string()}>{value}</div>
                <div class="stat-desc">{desc.to_string()}</div>
            </div>
        </div>
    }
}

#[function_component(MetricCards)]
pub fn metric_cards(props: &Props) -> Html {
    let show = |f: fn(&MetricsSnapshot) -> String| {
        props.metrics.as_ref().map(f).unwrap_or_else(|| "-".to_string())
    };

    html! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {stat("Streak", "streak-count", show(|m| m.current_streak.to_string()), "days in a row")}
            {stat("Calories", "total-calories", show(|m| m.total_calories.to_string()), "kcal burned")}
            {stat("Hours", "total-hours", show(|m| m.total_hours.to_string()), "time trained")}
            {stat("Percentile", "percentile", show(|m| format!("{}%", m.percentile)), "compared to everyone")}
        </div>
    }
}
