use common::Post;
use std::future::Future;
use yew::prelude::*;

use super::composer::Composer;
use super::post_card::PostCard;
use crate::hooks::FetchState;
use crate::settings;
use crate::social::{SocialError, SocialFeed};
use crate::tabs::effect_requested;
use crate::ui::{FetchRender, ToastContext};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Changes whenever the tab is (re)entered.
    pub refresh: u32,
}

/// Runs a feed operation and shows the list it returns.
fn apply<F>(posts: UseStateHandle<FetchState<Vec<Post>>>, toast_ctx: Option<ToastContext>, action: F)
where
    F: Future<Output = Result<Vec<Post>, SocialError>> + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        match action.await {
            Ok(list) => posts.set(FetchState::Success(list)),
            Err(e) => {
                log::error!("Social action failed: {}", e);
                if let Some(toast_ctx) = toast_ctx {
                    toast_ctx.show_error(e.to_string());
                }
            }
        }
    });
}

#[function_component(SocialTab)]
pub fn social_tab(props: &Props) -> Html {
    let feed = use_state(|| None::<SocialFeed>);
    let posts = use_state(|| FetchState::<Vec<Post>>::NotStarted);
    let toast_ctx = use_context::<ToastContext>();

    {
        let feed = feed.clone();
        use_effect_with((), move |_| {
            let mode = settings::get_settings().social_mode;
            wasm_bindgen_futures::spawn_local(async move {
                feed.set(Some(SocialFeed::connect(mode).await));
            });
            || ()
        });
    }

    let load = {
        let posts = posts.clone();
        move |feed: SocialFeed| {
            let posts = posts.clone();
            posts.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                posts.set(FetchState::from_result(feed.load_posts().await));
            });
        }
    };

    {
        let load = load.clone();
        use_effect_with((props.refresh, (*feed).clone()), move |(refresh, feed)| {
            if let (Some(feed), true) = (feed, effect_requested(*refresh)) {
                load(feed.clone());
            }
            || ()
        });
    }

    let Some(current) = (*feed).clone() else {
        return html! { <p class="text-gray-500">{"Connecting..."}</p> };
    };

    let on_post = {
        let (feed, posts, toast_ctx) = (current.clone(), posts.clone(), toast_ctx.clone());
        Callback::from(move |content: String| {
            let feed = feed.clone();
            apply(posts.clone(), toast_ctx.clone(), async move { feed.submit_post(&content).await });
        })
    };

    let on_comment = {
        let (feed, posts, toast_ctx) = (current.clone(), posts.clone(), toast_ctx.clone());
        Callback::from(move |(post_id, text): (i64, String)| {
            let feed = feed.clone();
            apply(posts.clone(), toast_ctx.clone(), async move { feed.submit_comment(post_id, &text).await });
        })
    };

    let on_like = {
        let (feed, posts, toast_ctx) = (current.clone(), posts.clone(), toast_ctx.clone());
        Callback::from(move |post_id: i64| {
            let feed = feed.clone();
            apply(posts.clone(), toast_ctx.clone(), async move { feed.like_post(post_id).await });
        })
    };

    let on_bookmark = {
        let (feed, posts, toast_ctx) = (current.clone(), posts.clone(), toast_ctx.clone());
        Callback::from(move |post_id: i64| {
            let feed = feed.clone();
            apply(posts.clone(), toast_ctx.clone(), async move { feed.bookmark_post(post_id).await });
        })
    };

    let on_retry = {
        let current = current.clone();
        Callback::from(move |_| load(current.clone()))
    };

    let render_posts = Callback::from(move |list: Vec<Post>| {
        if list.is_empty() {
            return html! { <p class="text-gray-500">{"No posts yet."}</p> };
        }
        html! {
            <div class="space-y-4" id="post-list">
                { for list.into_iter().map(|post| {
                    let key = post.id.to_string();
                    html! {
                        <PostCard
                            key={key}
                            post={post}
                            on_like={on_like.clone()}
                            on_bookmark={on_bookmark.clone()}
                            on_comment={on_comment.clone()}
                        />
                    }
                }) }
            </div>
        }
    });

    html! {
        <div class="max-w-2xl mx-auto space-y-4">
            <Composer on_submit={on_post} />
            <FetchRender<Vec<Post>>
                state={(*posts).clone()}
                render={render_posts}
                on_retry={Some(on_retry)}
            />
        </div>
    }
}
