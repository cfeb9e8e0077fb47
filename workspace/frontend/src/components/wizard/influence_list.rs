use wizard::InfluenceFactor;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InfluenceListProps {
    pub factors: Vec<InfluenceFactor>,
}

/// Ranked feature importances as colored bars.
#[function_component(InfluenceList)]
pub fn influence_list(props: &InfluenceListProps) -> Html {
    if props.factors.is_empty() {
        return html! {};
    }

    html! {
        <div class="rounded-box border border-base-300 p-4">
            <h3 class="font-semibold mb-4">{"Principais Fatores de Influência"}</h3>
            <div class="flex flex-col gap-3">
                {for props.factors.iter().map(|factor| html! {
                    <div key={factor.feature.clone()}>
                        <div class="flex justify-between text-sm mb-1">
                            <span>{&factor.label}</span>
                            <span class="font-semibold">{format!("{:.1}%", factor.importance_pct)}</span>
                        </div>
                        <div class="w-full h-2 rounded bg-base-200">
                            <div
                                class="h-2 rounded"
                                style={format!(
                                    "width: {:.1}%; background-color: {};",
                                    factor.importance_pct.clamp(0.0, 100.0),
                                    factor.color
                                )}
                            ></div>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}
