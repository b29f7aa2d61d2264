//! 계산이 끝난 각 단계 결과에 추적 정보를 붙인다.
//!
//! 최종 값은 항상 단계 결과에서 그대로 가져오고, 대입식과 중간 결과만 새로 만든다.

use std::sync::Arc;

use super::Layers;
use crate::finance::{after_tax_flows, npv_at};
use crate::normalize::NormalizedInput;
use crate::quantity::Metric;
use crate::trace::{num, TraceBuilder, TraceableValue};

type Trace = Arc<TraceableValue>;

/// 지표별 추적 값.
#[derive(Debug, Clone, PartialEq)]
pub struct Traces {
    pub total_capital_investment: Trace,
    pub production: Trace,
    pub feedstock_consumption: Trace,
    pub hydrogen_consumption: Trace,
    pub electricity_consumption: Trace,
    pub fuel_energy_content: Trace,
    pub carbon_conversion_efficiency: Option<Trace>,
    pub indirect_opex: Trace,
    pub feedstock_cost: Trace,
    pub hydrogen_cost: Trace,
    pub electricity_cost: Trace,
    pub total_carbon_intensity: Trace,
    pub total_revenue: Trace,
    pub direct_opex: Trace,
    pub carbon_intensity: Trace,
    pub total_opex: Trace,
    pub total_co2_emissions: Trace,
    pub capital_recovery_factor: Trace,
    pub annualized_capital: Trace,
    pub lcop: Trace,
    pub lcca: Option<Trace>,
    pub npv: Trace,
    pub irr: Option<Trace>,
    pub payback_period: Option<Trace>,
}

fn sum_expr(parts: &[f64]) -> String {
    parts.iter().map(|v| num(*v)).collect::<Vec<_>>().join(" + ")
}

pub fn annotate(input: &NormalizedInput, layers: &Layers) -> Traces {
    let core = &layers.core;
    let costs = &layers.unit_costs;
    let agg = &layers.aggregates;
    let kpi = &layers.kpis;
    let econ = &input.economics;
    let capacity = input.plant.capacity;

    // 1단계
    let ratio = capacity / econ.reference_capacity;
    let scale = ratio.powf(econ.scaling_exponent);
    let tci = TraceBuilder::new(
        "total_capital_investment",
        "USD",
        "TCI = TCI_ref * (capacity / capacity_ref) ^ exponent",
    )
    .scalar("TCI_ref", econ.reference_tci, "USD")
    .scalar("capacity", capacity, "t/yr")
    .scalar("capacity_ref", econ.reference_capacity, "t/yr")
    .scalar("exponent", econ.scaling_exponent, "-")
    .step(
        "용량비",
        "capacity / capacity_ref",
        format!("{} / {}", num(capacity), num(econ.reference_capacity)),
        ratio,
    )
    .step(
        "규모 계수",
        "(capacity / capacity_ref) ^ exponent",
        format!("{} ^ {}", num(ratio), num(econ.scaling_exponent)),
        scale,
    )
    .step(
        "총투자비",
        "TCI_ref * scale",
        format!("{} * {}", num(econ.reference_tci), num(scale)),
        core.tci,
    )
    .build(core.tci);

    let mut b = TraceBuilder::new("production", "t/yr", "production = Σ capacity * yield_i")
        .scalar("capacity", capacity, "t/yr");
    for (p, out) in input.products.iter().zip(&core.products) {
        b = b.scalar(format!("yield[{}]", p.name), p.mass_yield, "t/t").step(
            format!("{} 생산량", p.name),
            "capacity * yield_i",
            format!("{} * {}", num(capacity), num(p.mass_yield)),
            out.production,
        );
    }
    let parts: Vec<f64> = core.products.iter().map(|p| p.production).collect();
    let production = b
        .step("총 생산량", "Σ production_i", sum_expr(&parts), core.total_production)
        .build(core.total_production);

    let mut b = TraceBuilder::new(
        "feedstock_consumption",
        "t/yr",
        "feedstock_consumption = Σ capacity * feedstock_yield_j",
    )
    .scalar("capacity", capacity, "t/yr");
    for (f, out) in input.feedstocks.iter().zip(&core.feedstocks) {
        b = b.scalar(format!("yield[{}]", f.name), f.mass_yield, "t/t").step(
            format!("{} 투입량", f.name),
            "capacity * feedstock_yield_j",
            format!("{} * {}", num(capacity), num(f.mass_yield)),
            out.consumption,
        );
    }
    let parts: Vec<f64> = core.feedstocks.iter().map(|f| f.consumption).collect();
    let feedstock_consumption = b
        .step(
            "총 원료 투입량",
            "Σ consumption_j",
            sum_expr(&parts),
            core.total_feedstock_consumption,
        )
        .build(core.total_feedstock_consumption);

    let utility_consumption = |name: &str, unit: &str, yield_unit: &str, y: f64, value: f64| {
        TraceBuilder::new(name, unit, format!("{name} = capacity * yield"))
            .scalar("capacity", capacity, "t/yr")
            .scalar("yield", y, yield_unit)
            .step(
                "소비량",
                "capacity * yield",
                format!("{} * {}", num(capacity), num(y)),
                value,
            )
            .build(value)
    };
    let hydrogen_consumption = utility_consumption(
        "hydrogen_consumption",
        "t/yr",
        "t/t",
        input.hydrogen.consumption_yield,
        core.hydrogen_consumption,
    );
    let electricity_consumption = utility_consumption(
        "electricity_consumption",
        "MWh/yr",
        "MWh/t",
        input.electricity.consumption_yield,
        core.electricity_consumption,
    );

    let total_yield: f64 = input.products.iter().map(|p| p.mass_yield).sum();
    let mut b = TraceBuilder::new(
        "fuel_energy_content",
        "MJ/kg",
        "fuel_energy_content = Σ energy_content_i * yield_i / Σ yield",
    );
    for (p, out) in input.products.iter().zip(&core.products) {
        b = b
            .scalar(format!("energy_content[{}]", p.name), p.energy_content, "MJ/kg")
            .step(
                format!("{} 질량분율", p.name),
                "yield_i / Σ yield",
                format!("{} / {}", num(p.mass_yield), num(total_yield)),
                out.mass_fraction,
            )
            .step(
                format!("{} 기여분", p.name),
                "energy_content_i * mass_fraction_i",
                format!("{} * {}", num(p.energy_content), num(out.mass_fraction)),
                p.energy_content * out.mass_fraction,
            );
    }
    let parts: Vec<f64> = input
        .products
        .iter()
        .zip(&core.products)
        .map(|(p, out)| p.energy_content * out.mass_fraction)
        .collect();
    let fuel_energy_content = b
        .step(
            "가중 평균 발열량",
            "Σ contribution_i",
            sum_expr(&parts),
            core.fuel_energy_content,
        )
        .build(core.fuel_energy_content);

    let carbon_conversion_efficiency = match core.carbon_conversion_efficiency {
        Metric::Defined(v) => Some(
            TraceBuilder::new(
                "carbon_conversion_efficiency",
                "%",
                "CCE = product_carbon_content / feedstock_carbon_content * 100",
            )
            .scalar("product_carbon_content", core.product_carbon_content, "fraction")
            .scalar("feedstock_carbon_content", core.feedstock_carbon_content, "fraction")
            .step(
                "탄소 전환 효율",
                "product_cc / feedstock_cc * 100",
                format!(
                    "{} / {} * 100",
                    num(core.product_carbon_content),
                    num(core.feedstock_carbon_content)
                ),
                v,
            )
            .build(v),
        ),
        Metric::Undefined { .. } => None,
    };

    // 2단계
    let indirect_opex = TraceBuilder::new(
        "indirect_opex",
        "USD/yr",
        "indirect_opex = indirect_opex_ratio * TCI",
    )
    .traced("TCI", &tci)
    .scalar("indirect_opex_ratio", econ.indirect_opex_ratio, "-")
    .step(
        "간접 운영비",
        "ratio * TCI",
        format!("{} * {}", num(econ.indirect_opex_ratio), num(core.tci)),
        costs.indirect_opex,
    )
    .build(costs.indirect_opex);

    let mut b = TraceBuilder::new(
        "feedstock_cost",
        "USD/yr",
        "feedstock_cost = Σ consumption_j * price_j",
    )
    .traced("feedstock_consumption", &feedstock_consumption);
    for ((f, out), c) in input
        .feedstocks
        .iter()
        .zip(&core.feedstocks)
        .zip(&costs.feedstock_costs)
    {
        b = b.scalar(format!("price[{}]", f.name), f.price, "USD/t").step(
            format!("{} 원료비", f.name),
            "consumption_j * price_j",
            format!("{} * {}", num(out.consumption), num(f.price)),
            c.annual_cost,
        );
    }
    let parts: Vec<f64> = costs.feedstock_costs.iter().map(|c| c.annual_cost).collect();
    let feedstock_cost = b
        .step("총 원료비", "Σ cost_j", sum_expr(&parts), costs.feedstock_cost)
        .build(costs.feedstock_cost);

    let utility_cost = |name: &str, consumption: &Trace, price: f64, price_unit: &str, value: f64| {
        TraceBuilder::new(name, "USD/yr", format!("{name} = consumption * price"))
            .traced("consumption", consumption)
            .scalar("price", price, price_unit)
            .step(
                "연간 비용",
                "consumption * price",
                format!("{} * {}", num(consumption.value()), num(price)),
                value,
            )
            .build(value)
    };
    let hydrogen_cost = utility_cost(
        "hydrogen_cost",
        &hydrogen_consumption,
        input.hydrogen.price,
        "USD/t",
        costs.hydrogen_cost,
    );
    let electricity_cost = utility_cost(
        "electricity_cost",
        &electricity_consumption,
        input.electricity.price,
        "USD/MWh",
        costs.electricity_cost,
    );

    let mut b = TraceBuilder::new(
        "total_carbon_intensity",
        "kgCO2e/MJ",
        "CI = (Σ CI_feed_j * yield_j + CI_process) / 1000",
    )
    .scalar("CI_process", input.plant.process_carbon_intensity, "gCO2e/MJ");
    let mut feed_ci = 0.0;
    for f in &input.feedstocks {
        let part = f.carbon_intensity * f.mass_yield;
        feed_ci += part;
        b = b
            .scalar(format!("CI[{}]", f.name), f.carbon_intensity, "gCO2e/MJ")
            .step(
                format!("{} 기여분", f.name),
                "CI_feed_j * yield_j",
                format!("{} * {}", num(f.carbon_intensity), num(f.mass_yield)),
                part,
            );
    }
    let total_carbon_intensity = b
        .step(
            "g → kg 환산",
            "(Σ + CI_process) / 1000",
            format!(
                "({} + {}) / 1000",
                num(feed_ci),
                num(input.plant.process_carbon_intensity)
            ),
            costs.total_carbon_intensity,
        )
        .build(costs.total_carbon_intensity);

    let mut b = TraceBuilder::new(
        "total_revenue",
        "USD/yr",
        "revenue = Σ production_i * (price_i - sensitivity_i * CI[g/MJ])",
    )
    .traced("production", &production)
    .traced("carbon_intensity", &total_carbon_intensity);
    for ((p, out), r) in input
        .products
        .iter()
        .zip(&core.products)
        .zip(&costs.revenues)
    {
        b = b
            .scalar(format!("price[{}]", p.name), p.price, "USD/t")
            .step(
                format!("{} 유효 판매가", p.name),
                "price_i - sensitivity_i * CI * 1000",
                format!(
                    "{} - {} * {}",
                    num(p.price),
                    num(p.price_ci_sensitivity),
                    num(r.carbon_intensity * 1000.0)
                ),
                r.effective_price,
            )
            .step(
                format!("{} 매출", p.name),
                "production_i * effective_price_i",
                format!("{} * {}", num(out.production), num(r.effective_price)),
                r.revenue,
            );
    }
    let total_revenue = b.build(costs.total_revenue);

    // 3단계
    let direct_opex = TraceBuilder::new(
        "direct_opex",
        "USD/yr",
        "direct_opex = feedstock_cost + hydrogen_cost + electricity_cost",
    )
    .traced("feedstock_cost", &feedstock_cost)
    .traced("hydrogen_cost", &hydrogen_cost)
    .traced("electricity_cost", &electricity_cost)
    .step(
        "직접 운영비",
        "feedstock + hydrogen + electricity",
        sum_expr(&[costs.feedstock_cost, costs.hydrogen_cost, costs.electricity_cost]),
        agg.total_direct_opex,
    )
    .build(agg.total_direct_opex);

    let mut b = TraceBuilder::new(
        "carbon_intensity",
        "kgCO2e/MJ",
        "CI_weighted = Σ CI_i * mass_fraction_i",
    )
    .traced("total_carbon_intensity", &total_carbon_intensity);
    for (r, out) in costs.revenues.iter().zip(&core.products) {
        b = b
            .scalar(format!("mass_fraction[{}]", r.name), out.mass_fraction, "fraction")
            .step(
                format!("{} 기여분", r.name),
                "CI_i * mass_fraction_i",
                format!("{} * {}", num(r.carbon_intensity), num(out.mass_fraction)),
                r.carbon_intensity * out.mass_fraction,
            );
    }
    let carbon_intensity = b.build(agg.weighted_carbon_intensity);

    // 4단계
    let total_opex = TraceBuilder::new(
        "total_opex",
        "USD/yr",
        "total_opex = direct_opex + indirect_opex",
    )
    .traced("direct_opex", &direct_opex)
    .traced("indirect_opex", &indirect_opex)
    .step(
        "총 운영비",
        "direct + indirect",
        sum_expr(&[agg.total_direct_opex, costs.indirect_opex]),
        kpi.total_opex,
    )
    .build(kpi.total_opex);

    let total_co2_emissions = TraceBuilder::new(
        "total_co2_emissions",
        "kgCO2e/yr",
        "CO2 = CI * fuel_energy_content * production * 1000",
    )
    .traced("carbon_intensity", &carbon_intensity)
    .traced("fuel_energy_content", &fuel_energy_content)
    .traced("production", &production)
    .step(
        "연간 배출량",
        "CI * energy * production * 1000",
        format!(
            "{} * {} * {} * 1000",
            num(agg.weighted_carbon_intensity),
            num(core.fuel_energy_content),
            num(core.total_production)
        ),
        kpi.total_co2_emissions,
    )
    .build(kpi.total_co2_emissions);

    let r = econ.discount_rate;
    let n = econ.lifetime_years;
    let mut b = TraceBuilder::new(
        "capital_recovery_factor",
        "1/yr",
        "CRF = r(1+r)^n / ((1+r)^n - 1), r = 0 이면 1/n",
    )
    .scalar("r", r, "-")
    .scalar("n", n as f64, "yr");
    b = if r == 0.0 {
        b.step("할인율 0", "1 / n", format!("1 / {n}"), kpi.capital_recovery_factor)
    } else {
        let growth = (1.0 + r).powf(n as f64);
        b.step("복리 계수", "(1+r)^n", format!("(1 + {})^{n}", num(r)), growth)
            .step(
                "자본회수계수",
                "r * (1+r)^n / ((1+r)^n - 1)",
                format!("{} * {} / ({} - 1)", num(r), num(growth), num(growth)),
                kpi.capital_recovery_factor,
            )
    };
    let capital_recovery_factor = b.build(kpi.capital_recovery_factor);

    let annualized_capital = TraceBuilder::new(
        "annualized_capital",
        "USD/yr",
        "annualized_capital = TCI * CRF",
    )
    .traced("TCI", &tci)
    .traced("CRF", &capital_recovery_factor)
    .step(
        "연간 자본비",
        "TCI * CRF",
        format!("{} * {}", num(core.tci), num(kpi.capital_recovery_factor)),
        kpi.annualized_capital,
    )
    .build(kpi.annualized_capital);

    let numerator = costs.feedstock_cost
        + costs.hydrogen_cost
        + costs.electricity_cost
        + costs.indirect_opex
        + kpi.annualized_capital;
    let lcop = TraceBuilder::new(
        "lcop",
        "USD/t",
        "LCOP = (feedstock + hydrogen + electricity + indirect_opex + annualized_capital) / production",
    )
    .traced("feedstock_cost", &feedstock_cost)
    .traced("hydrogen_cost", &hydrogen_cost)
    .traced("electricity_cost", &electricity_cost)
    .traced("indirect_opex", &indirect_opex)
    .traced("annualized_capital", &annualized_capital)
    .traced("production", &production)
    .step(
        "연간 총비용",
        "feedstock + hydrogen + electricity + indirect + annualized",
        sum_expr(&[
            costs.feedstock_cost,
            costs.hydrogen_cost,
            costs.electricity_cost,
            costs.indirect_opex,
            kpi.annualized_capital,
        ]),
        numerator,
    )
    .step(
        "균등화 생산원가",
        "total_cost / production",
        format!("{} / {}", num(numerator), num(core.total_production)),
        kpi.lcop,
    )
    .build(kpi.lcop);

    let lcca = kpi.lcca.value().map(|v| {
        TraceBuilder::new(
            "lcca",
            "USD/tCO2e",
            "LCCA = (LCOP - reference_fuel_price) * production / (CO2 / 1000)",
        )
        .traced("lcop", &lcop)
        .traced("production", &production)
        .traced("total_co2_emissions", &total_co2_emissions)
        .scalar("reference_fuel_price", econ.reference_fuel_price, "USD/t")
        .step(
            "탄소 귀속 비용",
            "(LCOP - reference_fuel_price) * production",
            format!(
                "({} - {}) * {}",
                num(kpi.lcop),
                num(econ.reference_fuel_price),
                num(core.total_production)
            ),
            (kpi.lcop - econ.reference_fuel_price) * core.total_production,
        )
        .step(
            "균등화 탄소 저감비용",
            "carbon_cost / (CO2 / 1000)",
            format!(
                "{} / ({} / 1000)",
                num((kpi.lcop - econ.reference_fuel_price) * core.total_production),
                num(kpi.total_co2_emissions)
            ),
            v,
        )
        .build(v)
    });

    // 재무
    let fin = &layers.finance;
    let mut b = TraceBuilder::new(
        "npv",
        "USD",
        "NPV = Σ ATCF_t / (1+r)^t (t = -2..lifetime)",
    )
    .traced("TCI", &tci)
    .traced("total_revenue", &total_revenue)
    .traced("total_opex", &total_opex)
    .scalar("discount_rate", r, "-")
    .scalar("lifetime", n as f64, "yr");
    for row in &fin.rows {
        b = b.step(
            format!("{}년 할인 현금흐름", row.year),
            "ATCF_t * DF_t",
            format!(
                "{} * {}",
                num(row.after_tax_cash_flow),
                num(row.discount_factor)
            ),
            row.discounted_cash_flow,
        );
    }
    let npv = b
        .step(
            "순현재가치",
            "마지막 누적 할인 현금흐름",
            num(fin.npv),
            fin.npv,
        )
        .build(fin.npv);

    let irr = fin.irr.as_ref().ok().map(|&v| {
        let residual = npv_at(v, &after_tax_flows(&fin.rows));
        TraceBuilder::new("irr", "-", "NPV(IRR) = 0, 이분법 탐색")
            .traced("npv", &npv)
            .step(
                "잔차 확인",
                "Σ ATCF_t / (1+IRR)^t",
                format!("IRR = {}", num(v)),
                residual,
            )
            .build(v)
    });

    let payback_period = fin.payback.map(|pb| {
        let cur = fin.rows.iter().find(|row| row.year == pb.year);
        let prev = fin.rows.iter().find(|row| row.year == pb.year - 1);
        let mut b = TraceBuilder::new(
            "payback_period",
            "yr",
            "min t: cumulative_DCF_t ≥ 0 and cumulative_DCF_(t-1) < 0",
        )
        .traced("npv", &npv);
        if let (Some(prev), Some(cur)) = (prev, cur) {
            let (c0, c1) = (
                prev.cumulative_discounted_cash_flow,
                cur.cumulative_discounted_cash_flow,
            );
            b = b
                .step(
                    "손익분기 연도",
                    "cumulative_DCF_t",
                    format!("{}년: {} → {}년: {}", prev.year, num(c0), cur.year, num(c1)),
                    pb.year as f64,
                )
                .step(
                    "선형 보간 추정",
                    "(t-1) + (-cum_(t-1)) / (cum_t - cum_(t-1))",
                    format!("{} + {} / ({} - {})", prev.year, num(-c0), num(c1), num(c0)),
                    pb.interpolated,
                );
        }
        b.build(pb.year as f64)
    });

    Traces {
        total_capital_investment: tci,
        production,
        feedstock_consumption,
        hydrogen_consumption,
        electricity_consumption,
        fuel_energy_content,
        carbon_conversion_efficiency,
        indirect_opex,
        feedstock_cost,
        hydrogen_cost,
        electricity_cost,
        total_carbon_intensity,
        total_revenue,
        direct_opex,
        carbon_intensity,
        total_opex,
        total_co2_emissions,
        capital_recovery_factor,
        annualized_capital,
        lcop,
        lcca,
        npv,
        irr,
        payback_period,
    }
}
