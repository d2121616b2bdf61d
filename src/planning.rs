//! Fixed summit-commissioning catalog used by the demo binary. Not part of
//! the reusable core; kept as a worked example of assembling a timeline.

use chrono::NaiveDate;

use crate::entity::{Activity, Entity, Functionality, HorizontalAlign, Milestone, VerticalAlign};
use crate::timeline::Timeline;

const CCS: &str = "red";
const INRIA: &str = "magenta";
const TS: &str = "cyan";

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("catalog dates are literal ISO dates")
}

fn span(description: &str, start: &str, end: &str) -> Activity {
    Activity::spanning(description, d(start), d(end)).expect("catalog dates are ordered")
}

fn days(description: &str, start: &str, duration_days: u32) -> Activity {
    Activity::days(description, d(start), duration_days)
}

fn color(c: &str) -> Entity {
    Entity::SetDefaultColor {
        color: Some(c.into()),
        border: None,
    }
}

fn color_border(c: &str, b: &str) -> Entity {
    Entity::SetDefaultColor {
        color: Some(c.into()),
        border: Some(b.into()),
    }
}

/// The commissioning plan; milestone and delivered-functionality groups are
/// included only on request.
pub fn commissioning_plan(include_milestones: bool) -> Timeline {
    let mut timeline = Timeline::new();

    if include_milestones {
        timeline.push_group(vec![
            color("red"),
            Entity::SetMarkerWidth(1.0),
            Milestone::new("IM_1", d("2021-04-01")).with_color("red").into(),
            Milestone::new("IM_b", d("2021-04-30"))
                .with_color("green")
                .with_halign(HorizontalAlign::Left)
                .into(),
            Milestone::new("IM_c", d("2021-03-31"))
                .with_color("green")
                .with_halign(HorizontalAlign::Left)
                .with_valign(VerticalAlign::Bottom)
                .into(),
            Milestone::new("IM_d", d("2021-05-31")).into(),
            Milestone::new("IM_f", d("2021-04-15")).into(),
            Milestone::new("IM_pg", d("2021-04-15"))
                .with_valign(VerticalAlign::Bottom)
                .into(),
            Milestone::new("IM_g", d("2021-07-31")).into(),
            Milestone::new("IM_h", d("2021-09-30")).into(),
        ]);
        timeline.push_group(vec![
            color("blue"),
            Entity::SetArrowLength(5.0),
            Functionality::new("ScriptQueue", d("2021-03-01")).into(),
            Milestone::new("OCPS@NTS", d("2021-03-26"))
                .with_valign(VerticalAlign::Bottom)
                .into(),
            Functionality::new("OCPS", d("2021-04-01")).into(),
            Milestone::new("Gen3@NTS", d("2021-03-29"))
                .with_halign(HorizontalAlign::Left)
                .into(),
            Functionality::new("Gen3@CP", d("2021-04-05"))
                .with_arrow_dy(0.1)
                .into(),
            Entity::AdvanceRow(1),
            color(TS),
            Functionality::new("M1M2M3", d("2021-03-31")).into(),
            Functionality::new("Slew TMA", d("2021-10-01")).into(),
            color(CCS),
            Functionality::new("Trending DB in EFD", d("2021-03-22")).into(),
            color(INRIA),
            Functionality::new("LOVE", d("2021-04-01"))
                .with_valign(VerticalAlign::Bottom)
                .with_arrow_dy(-0.1)
                .into(),
            Functionality::new("AuthList", d("2021-05-15")).into(),
            Functionality::new("Logging@CP", d("2021-06-15")).into(),
        ]);
        timeline.push_group(vec![span("ComCam Cold", "2021-03-26", "2021-05-31")
            .with_color(CCS)
            .into()]);
    }

    timeline.push_group(vec![
        color("black"),
        Entity::SetMarkerWidth(3.0),
        Milestone::new("NEED: Dome Weather Tight", d("2021-10-01")).into(),
        Milestone::new("TMA Contract Complete", d("2022-02-07")).into(),
    ]);
    timeline.push_group(vec![
        color("yellow"),
        days("Bridge Crane Installation", "2021-03-10", 35).into(),
        span("Dome Weather Tight", "2021-09-03", "2021-09-25").into(),
        span(
            "Integrating Structure Installation?",
            "2021-09-25",
            "2021-10-20",
        )
        .into(),
    ]);
    timeline.push_group(vec![
        color("blue"),
        span(
            "Installation of M2 hexapod with the TEA on the TMA",
            "2021-03-01",
            "2021-04-01",
        )
        .into(),
        span(
            "Refrigeration lines in coordination with the TMA stubs",
            "2021-04-02",
            "2021-05-05",
        )
        .into(),
        span("Refrigeration lines flushing", "2021-05-05", "2021-07-10").into(),
        color("red"),
        span("Install M1M3 w/surrogate on TMA", "2022-02-08", "2022-03-07").into(),
        span(
            "Dynamic M1M3 w/surrogate testing on TMA",
            "2022-03-08",
            "2022-04-20",
        )
        .into(),
        color("green"),
        span("M2 w/surrogate + baffle fit check", "2022-04-21", "2022-05-10").into(),
        span("M2 Glass on Cell", "2022-05-11", "2022-05-31").into(),
        span("M2 on TMA", "2022-05-31", "2022-06-20").into(),
        Entity::AdvanceRow(1),
        span(
            "Top End utilities install: (Liq, Air, Power, Fiber, Signal, Refrig, IT infrastructure)",
            "2021-04-01",
            "2021-07-10",
        )
        .into(),
        span(
            "Cabinet utilities (Power, Data, Liq)",
            "2021-07-15",
            "2021-08-10",
        )
        .into(),
        days("Refriger. Cabinet (1 week)", "2021-08-11", 21).into(),
        span("M2 SW Update and func test", "2021-03-10", "2021-03-31")
            .with_color("green")
            .into(),
    ]);
    timeline.push_group(vec![
        color_border("white", "green"),
        span(
            "AOS integration testing without ComCam Including I&T with the rest of the control \
             network and Ptg, TMA, ...",
            "2021-04-01",
            "2021-06-30",
        )
        .into(),
        color("red"),
        span("M1M3 SW Update and Func tests", "2021-03-01", "2021-03-31").into(),
        days("M1M3 coating preparation?", "2021-11-10", 30).into(),
        Milestone::new("Start M2 fit check", d("2022-04-20"))
            .with_halign(HorizontalAlign::Left)
            .with_valign(VerticalAlign::Bottom)
            .into(),
        Milestone::new("TMA Ready for M1M3 Glass", d("2022-06-21"))
            .with_halign(HorizontalAlign::Left)
            .into(),
        span(
            "M1M3 Surrogate to Mirror on Cell",
            "2022-06-21",
            "2022-07-31",
        )
        .into(),
        span("M1M3 Glass Coating", "2022-08-01", "2022-08-15")
            .with_color("orange")
            .into(),
        span(
            "M1M3 Mirror on TMA & thermal control tests",
            "2022-08-16",
            "2022-12-31",
        )
        .into(),
        Entity::AdvanceRow(-1),
        color("violet"),
        span("M3 Testing", "2022-08-16", "2022-09-06").into(),
        span("Initial Optical Alignment", "2022-09-07", "2022-09-30").into(),
        span(
            "Active Optics Calibration & Verification",
            "2022-09-30",
            "2022-12-31",
        )
        .into(),
        Entity::AdvanceRow(1),
    ]);
    timeline.push_group(vec![
        color("blue"),
        span("Cam Hexapod  re-verification", "2021-03-01", "2021-04-30").into(),
        color_border("white", "green"),
        span(
            "Active Optics Software integration testing with ComCam (Level 3)",
            "2021-06-01",
            "2021-09-30",
        )
        .into(),
        span(
            "Continued Active Optics Software integration testing without ComCam (Level-3)",
            "2021-10-01",
            "2022-01-10",
        )
        .into(),
    ]);
    timeline.push_group(vec![
        color("red"),
        span(
            "M1M3 thermal control system installation and test",
            "2021-03-01",
            "2022-01-10",
        )
        .into(),
        Milestone::new("Ready for integrated optical tests", d("2022-09-15"))
            .with_halign(HorizontalAlign::Left)
            .into(),
        Milestone::new("Engineering First Light", d("2022-11-01")).into(),
    ]);
    timeline.push_group(vec![
        color_border("white", "green"),
        span(
            "Final prep for Camera Hexapod,  rotator and CCW",
            "2021-03-01",
            "2021-03-15",
        )
        .into(),
        span(
            "Early ComCam, Pathfinder, Rotator, Hexapod and CCW Integration testing (Summit Level 3)",
            "2021-04-01",
            "2021-09-30",
        )
        .into(),
        span(
            "ComCam, Rotator, Hexapod and CCW On TMA  (Not on sky)",
            "2021-10-10",
            "2022-04-10",
        )
        .into(),
        span("ComCam testing (Not on sky)", "2022-06-01", "2022-09-20").into(),
        span("ComCam testing (on sky)", "2022-09-21", "2022-12-31").into(),
        Entity::AdvanceRow(1),
        span(
            "Refrigeration Pathfinder (in ComCam) Operation through CCW (Summit Level 3)",
            "2021-04-01",
            "2021-09-30",
        )
        .into(),
        span(
            "Refrigeration Pathfinder (In ComCam) Operation on TMA",
            "2021-10-10",
            "2022-04-10",
        )
        .into(),
        span(
            "Refrigeration Pathfinder long term performance",
            "2022-05-15",
            "2022-12-31",
        )
        .into(),
        color_border("white", "magenta"),
        span(
            "Install ComCam & Pathfinder on Rotator",
            "2021-03-15",
            "2021-03-31",
        )
        .into(),
        span(
            "ComCam installation on the TMA for CCW testing",
            "2021-10-01",
            "2021-10-10",
        )
        .into(),
    ]);
    timeline.push_group(vec![
        color_border("white", "green"),
        span("Testing CCW, Rotator and  Hex", "2021-03-01", "2021-04-10").into(),
        span(
            "GIS integration and testing on level 3",
            "2021-04-10",
            "2021-08-30",
        )
        .into(),
        span("GIS verification testing", "2021-09-01", "2021-12-10").into(),
        span(
            "In-Dome Calibration Systems installation and alignment ",
            "2022-01-01",
            "2022-08-15",
        )
        .with_color("orchid")
        .into(),
    ]);
    timeline.push_group(vec![
        color("seagreen"),
        span(
            "Environmental Awareness System (EAS) @ AuxTel",
            "2021-03-01",
            "2021-10-30",
        )
        .into(),
        span(
            "Environmental Awareness System (EAS) @ MT",
            "2021-11-01",
            "2022-10-10",
        )
        .into(),
    ]);
    timeline.push_group(vec![
        color_border("yellow", "black"),
        span(
            "LSSTCam shipping. received in Chile, Assembly & Re-verification",
            "2022-06-01",
            "2022-12-31",
        )
        .into(),
    ]);
    timeline.push_group(vec![
        Milestone::new("LSSTCam Ready at SLAC 31-May-2022", d("2022-06-01"))
            .with_halign(HorizontalAlign::Left)
            .into(),
        Milestone::new("LSSTCam arrives in Chile", d("2022-07-01")).into(),
        Milestone::new("LSSTCam Integration", d("2023-01-23"))
            .with_halign(HorizontalAlign::Left)
            .into(),
    ]);
    timeline.push_group(vec![
        color("goldenrod"),
        span(
            "AT: On sky Testing / Observations with Spectrograph",
            "2021-03-01",
            "2022-12-31",
        )
        .into(),
    ]);

    timeline
}
