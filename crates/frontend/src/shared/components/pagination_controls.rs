use crate::shared::icons::icon;
use contracts::shared::pagination::Pager;
use leptos::prelude::*;

/// Previous / numbered pages / Next, driven by a [`Pager`] signal.
///
/// Pages are 1-based. Every move goes through the pager, so the controls can
/// never ask for page 0 or a page past the last one.
#[component]
pub fn PaginationControls(
    pager: RwSignal<Pager>,
    /// Total count of items, shown next to the buttons
    #[prop(into)]
    total_count: Signal<u64>,
    /// Disables every button while a page is loading
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <Show when=move || pager.with(|p| p.last() > 1)>
            <div class="pagination-controls">
                <button
                    class="pagination-btn"
                    on:click=move |_| {
                        pager.update(|p| {
                            p.previous();
                        })
                    }
                    disabled=move || disabled.get() || !pager.with(|p| p.has_previous())
                    title="Previous page"
                >
                    {icon("chevron-left")}
                    " Previous"
                </button>
                {move || {
                    let current = pager.with(|p| p.current());
                    pager
                        .with(|p| p.pages())
                        .into_iter()
                        .map(|n| {
                            let class = if n == current {
                                "pagination-btn pagination-btn--active"
                            } else {
                                "pagination-btn"
                            };
                            view! {
                                <button
                                    class=class
                                    disabled=move || disabled.get()
                                    on:click=move |_| {
                                        pager.update(|p| {
                                            p.go_to(n);
                                        })
                                    }
                                >
                                    {n}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="pagination-btn"
                    on:click=move |_| {
                        pager.update(|p| {
                            p.next();
                        })
                    }
                    disabled=move || disabled.get() || !pager.with(|p| p.has_next())
                    title="Next page"
                >
                    "Next "
                    {icon("chevron-right")}
                </button>
                <span class="pagination-info">
                    {move || {
                        let (current, last) = pager.with(|p| (p.current(), p.last()));
                        format!("{} / {} ({})", current, last, total_count.get())
                    }}
                </span>
            </div>
        </Show>
    }
}
