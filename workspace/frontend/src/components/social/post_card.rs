use common::Post;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub post: Post,
    pub on_like: Callback<i64>,
    pub on_bookmark: Callback<i64>,
    pub on_comment: Callback<(i64, String)>,
}

#[function_component(PostCard)]
pub fn post_card(props: &Props) -> Html {
    let comment_ref = use_node_ref();
    let post = &props.post;
    let id = post.id;

    let on_like = {
        let on_like = props.on_like.clone();
        Callback::from(move |_: MouseEvent| on_like.emit(id))
    };

    let on_bookmark = {
        let on_bookmark = props.on_bookmark.clone();
        Callback::from(move |_: MouseEvent| on_bookmark.emit(id))
    };

    let on_comment = {
        let comment_ref = comment_ref.clone();
        let on_comment = props.on_comment.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(input) = comment_ref.cast::<HtmlInputElement>() {
                on_comment.emit((id, input.value()));
                input.set_value("");
            }
        })
    };

    let like_icon = if post.liked { "fas fa-heart text-error" } else { "far fa-heart" };
    let bookmark_icon = if post.bookmarked { "fas fa-bookmark text-warning" } else { "far fa-bookmark" };

    html! {
        <div class="card bg-base-100 shadow post-card">
            <div class="card-body">
                <div class="flex justify-between items-baseline">
                    <span class="font-semibold">{&post.username}</span>
                    <span class="text-xs text-gray-500">{&post.timestamp}</span>
                </div>
                <p>{&post.content}</p>
                if let Some(image) = &post.image {
                    <img src={image.clone()} class="rounded-box max-h-64 object-cover" />
                }
                <div class="flex gap-2">
                    <button class="btn btn-ghost btn-sm like-btn" onclick={on_like}>
                        <i class={like_icon}></i>{format!(" {}", post.likes)}
                    </button>
                    <button class="btn btn-ghost btn-sm bookmark-btn" onclick={on_bookmark}>
                        <i class={bookmark_icon}></i>{format!(" {}", post.bookmarks.unwrap_or(0))}
                    </button>
                </div>
                <ul class="space-y-1 text-sm">
                    { for post.comments.iter().map(|c| html! {
                        <li><span class="font-semibold">{&c.username}</span>{format!(": {}", c.text)}</li>
                    }) }
                </ul>
                <form class="join w-full" onsubmit={on_comment}>
                    <input ref={comment_ref} type="text" class="input input-bordered input-sm join-item flex-1" placeholder="Write a comment..." />
                    <button type="submit" class="btn btn-sm join-item">{"Comment"}</button>
                </form>
            </div>
        </div>
    }
}
