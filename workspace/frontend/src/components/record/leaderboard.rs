use common::LeaderboardEntry;
use yew::prelude::*;

use crate::dashboard::visible_leaderboard;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub rows: Vec<LeaderboardEntry>,
}

#[function_component(Leaderboard)]
pub fn leaderboard(props: &Props) -> Html {
    let collapsed = use_state(|| true);

    let on_toggle = {
        let collapsed = collapsed.clone();
        Callback::from(move |_| collapsed.set(!*collapsed))
    };

    let toggle_text = if *collapsed { "Show All Rankings" } else { "Show Top 3 Only" };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{"Leaderboard"}</h2>
                <div id="leaderboard-container" class={classes!("overflow-x-auto", collapsed.then_some("collapsed"))}>
                    <table class="table table-zebra" id="leaderboard-table">
                        <thead>
                            <tr>
                                <th>{"Rank"}</th>
                                <th>{"User"}</th>
                                <th>{"Calories"}</th>
                                <th>{"Hours"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for visible_leaderboard(&props.rows, *collapsed).iter().map(|row| html! {
                                <tr key={row.rank.to_string()}>
                                    <td>{row.rank.to_string()}</td>
                                    <td>{&row.username}</td>
                                    <td>{row.total_calories.to_string()}</td>
                                    <td>{row.total_hours.to_string()}</td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                </div>
                <div class="card-actions justify-end">
                    <button id="toggle-leaderboard-btn" class="btn btn-ghost btn-sm" onclick={on_toggle}>
                        {toggle_text}
                    </button>
                </div>
            </div>
        </div>
    }
}
