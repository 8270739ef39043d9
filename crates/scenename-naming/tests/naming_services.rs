//! Composition of naming services and custom styles.

use std::sync::Arc;

use scenename_core::property::{episode, season, series};
use scenename_core::{ConverterService, Entity, EntityKind, Episode, Error, Movie, Release, Series};
use scenename_naming::format::scene_formatter;
use scenename_naming::params::keys;
use scenename_naming::{
    ConditionalNamingService, DelegatingNamingService, LiteralNamingService, NameBuilder,
    NameStyle, Namer, NamingDefaults, NamingParams, NamingService, SeparationType,
    SeparatorRules, Selector,
};

#[test]
fn exact_pair_rule_beats_default() {
    let converters = ConverterService::builder()
        .property(season::NUMBER, scenename_core::convert::NumberConverter::new("S", 2))
        .property(
            episode::NUMBER_IN_SEASON,
            scenename_core::convert::NumberConverter::new("E", 2),
        )
        .build();
    let rules = SeparatorRules::builder(".")
        .pair(season::NUMBER, episode::NUMBER_IN_SEASON, "")
        .separation_type(SeparationType::RANGE, "-")
        .build()
        .unwrap();
    let style = NameStyle::new(Arc::new(converters), Arc::new(rules));
    let mut builder = NameBuilder::new(&style);
    builder.append(series::NAME, "Psych").unwrap();
    builder.append(season::NUMBER, 8u32).unwrap();
    builder.append(episode::NUMBER_IN_SEASON, 1u32).unwrap();
    builder.append(episode::TITLE, "Pilot").unwrap();
    assert_eq!(builder.finish(), "Psych.S08E01.Pilot");
}

#[test]
fn custom_registration_before_defaults() {
    let defaults = NamingDefaults::new(&Default::default()).unwrap();
    let service = ConditionalNamingService::new(", ");
    service.register(
        Selector::predicate(|e| matches!(e, Entity::Movie(m) if m.year.is_none())),
        Arc::new(DelegatingNamingService::new(vec![])),
    );
    service.register(Selector::predicate(|_| true), defaults.naming_service());

    let params = NamingParams::new();
    assert_eq!(
        service
            .try_name(&Movie::new("Heat").into(), &params)
            .unwrap(),
        None
    );
    assert_eq!(
        service
            .name(&Movie::new("Heat").with_year(1995).into(), &params)
            .unwrap(),
        "Heat 1995"
    );
}

#[test]
fn delegating_service_reports_no_namer_when_all_decline() {
    let service = DelegatingNamingService::default().push(Arc::new(LiteralNamingService));
    let err = service
        .name(&Series::new("Psych").into(), &NamingParams::new())
        .unwrap_err();
    assert_eq!(err, Error::NoNamer { kind: EntityKind::Series });
}

#[test]
fn namers_can_be_used_directly_with_any_style() {
    let defaults = NamingDefaults::shared();
    let style = defaults.plain_style().clone().with_formatter(scene_formatter());
    let mut builder = NameBuilder::new(&style);
    let ep = Episode::seasoned(Series::new("Psych"), 8, 1).with_title("Juliet Takes a Luvvah");
    defaults
        .episode_namer()
        .build_name(&mut builder, &ep, &NamingParams::new())
        .unwrap();
    assert_eq!(builder.finish(), "Psych.S08E01.Juliet.Takes.a.Luvvah");
}

#[test]
fn release_params_reach_nested_namers() {
    let service = NamingDefaults::shared().naming_service();
    let rel = Release::new(Episode::seasoned(Series::new("Psych").with_year(2006), 8, 1))
        .with_tags(["HDTV"])
        .with_group("GRP");
    let params = NamingParams::new();
    assert_eq!(
        service.name(&rel.clone().into(), &params).unwrap(),
        "Psych.2006.S08E01.HDTV-GRP"
    );
    let no_year = params.with(keys::INCLUDE_YEAR, false);
    assert_eq!(service.name(&rel.into(), &no_year).unwrap(), "Psych.S08E01.HDTV-GRP");
}
