use yew::prelude::*;

const SESSIONS: [(&str, &str, &str); 4] = [
    ("Running", "30 min", "Aerobic"),
    ("Cycling", "45 min", "Aerobic"),
    ("Strength", "40 min", "Anaerobic"),
    ("Yoga", "25 min", "Recovery"),
];

/// Static list of suggested sessions.
#[function_component(WorkoutTab)]
pub fn workout_tab() -> Html {
    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            { for SESSIONS.iter().map(|(name, length, kind)| html! {
                <div class="card bg-base-100 shadow" key={*name}>
                    <div class="card-body">
                        <h2 class="card-title">{*name}</h2>
                        <p class="text-sm text-gray-500">{format!("{} · {}", length, kind)}</p>
                    </div>
                </div>
            }) }
        </div>
    }
}
