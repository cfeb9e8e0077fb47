use plotly::common::{DashType, Line, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Scatter};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use wizard::ChartPoint;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

const CHART_ID: &str = "forecast-result-chart";

fn to_js<T: serde::Serialize>(value: &T) -> Option<JsValue> {
    let json = serde_json::to_string(value).ok()?;
    js_sys::JSON::parse(&json).ok()
}

fn draw(series: &[ChartPoint]) -> Option<()> {
    let labels: Vec<String> = series.iter().map(|p| p.label.clone()).collect();
    let predicted: Vec<f64> = series.iter().map(|p| p.predicted_value).collect();

    let data = js_sys::Array::new();
    let forecast = Scatter::new(labels.clone(), predicted)
        .mode(Mode::LinesMarkers)
        .name("Previsão")
        .line(Line::new().color("rgb(79, 70, 229)").width(2.0));
    data.push(&to_js(&forecast)?);

    let trend: Option<Vec<f64>> = series.iter().map(|p| p.trend_value).collect();
    if let Some(trend) = trend {
        let trend = Scatter::new(labels, trend)
            .mode(Mode::Lines)
            .name("Tendência")
            .line(Line::new().color("rgb(239, 68, 68)").width(2.0).dash(DashType::Dash));
        data.push(&to_js(&trend)?);
    }

    let layout = Layout::new()
        .title(Title::with_text("Gráfico da Previsão com Tendência"))
        .x_axis(Axis::new().title(Title::with_text("Período")))
        .y_axis(Axis::new().title(Title::with_text("Demanda prevista")))
        .height(350);

    newPlot(CHART_ID, data.into(), to_js(&layout)?);
    Some(())
}

#[derive(Properties, PartialEq)]
pub struct ResultChartProps {
    pub series: Vec<ChartPoint>,
}

#[function_component(ResultChart)]
pub fn result_chart(props: &ResultChartProps) -> Html {
    let container_ref = use_node_ref();

    use_effect_with((container_ref.clone(), props.series.clone()), |(container_ref, series)| {
        if let Some(element) = container_ref.cast::<HtmlElement>() {
            element.set_id(CHART_ID);
            if draw(series).is_none() {
                log::error!("Failed to render forecast chart");
            }
        }
        || ()
    });

    if props.series.is_empty() {
        return html! {
            <div class="text-center py-8 text-gray-500">
                <i class="fas fa-chart-line text-4xl mb-4 opacity-50"></i>
                <p>{"Nenhum dado de previsão disponível."}</p>
            </div>
        };
    }

    html! {
        <div class="rounded-box border border-base-300 p-4">
            <div ref={container_ref} style="width:100%; height:350px;"></div>
        </div>
    }
}
