//! Names produced by the default naming service parse back to the entities
//! they were built from, and canonical names survive a parse and rename.

use proptest::prelude::*;
use scenename_core::{Entity, Episode, Media, Release, Series, SubtitleRelease};
use scenename_naming::{NamingDefaults, NamingParams, NamingService};
use scenename_parsing::{ParsingDefaults, ParsingService, ParsingServiceExt};

fn rename(text: &str) -> String {
    let entity = ParsingDefaults::shared()
        .parsing_service()
        .parse(text)
        .unwrap_or_else(|err| panic!("{text:?} did not parse: {err}"));
    NamingDefaults::shared()
        .naming_service()
        .name(&entity, &NamingParams::new())
        .unwrap_or_else(|err| panic!("{entity:?} could not be named: {err}"))
}

#[test]
fn canonical_media_names_survive() {
    for name in [
        "Psych",
        "Psych S08",
        "Psych S08E01",
        "Psych S08E01-E03",
        "Psych S08E01+E02+E04",
        "Psych S08E01 Juliet Takes a Luvvah",
        "Band of Brothers E03 Carentan",
        "The Daily Show 2014.01.15",
        "Inception 2010",
    ] {
        assert_eq!(rename(name), name);
    }
}

#[test]
fn canonical_release_names_survive() {
    for name in [
        "Psych.S08E01.HDTV.x264-EXCELLENCE",
        "Psych.S08E01-E03.HDTV.x264-EXCELLENCE",
        "Psych.2006.S08E01.HDTV-GRP",
        "Inception.2010.720p.BluRay.DTS.x264-GRP",
        "Psych.S08E01.HDTV.x264-EXCELLENCE.German-SubCentral",
        "Psych.S08E01.English.HI-Addic7ed",
    ] {
        assert_eq!(rename(name), name);
    }
}

#[test]
fn subtitle_release_decodes_to_its_source() {
    let release = Release::new(Episode::seasoned(Series::new("Psych"), 8, 1))
        .with_tags(["HDTV", "x264"])
        .with_group("EXCELLENCE");
    let subtitle = SubtitleRelease::for_release(release, "German").with_group("SubCentral");

    let name = NamingDefaults::shared()
        .naming_service()
        .name(&Entity::from(subtitle.clone()), &NamingParams::new())
        .unwrap();
    let parsed: SubtitleRelease = ParsingDefaults::shared()
        .parsing_service()
        .parse_as(&name)
        .unwrap();

    assert_eq!(parsed.language, subtitle.language);
    assert_eq!(parsed.group, subtitle.group);
    assert_eq!(parsed.media, subtitle.media);
    assert_eq!(parsed.matching_releases.len(), 1);
    assert_eq!(parsed.matching_releases[0].tags, subtitle.matching_releases[0].tags);
    assert_eq!(parsed.matching_releases[0].group, subtitle.matching_releases[0].group);
}

#[test]
fn scene_service_output_parses() {
    let episode = Episode::seasoned(Series::new("Psych"), 8, 1).with_title("Juliet Takes a Luvvah");
    let name = NamingDefaults::shared()
        .scene_naming_service()
        .name(&Entity::from(episode.clone()), &NamingParams::new())
        .unwrap();
    assert_eq!(name, "Psych.S08E01.Juliet.Takes.a.Luvvah");
    let parsed: Episode = ParsingDefaults::shared()
        .parsing_service()
        .parse_as(&name)
        .unwrap();
    assert_eq!(parsed, episode);
}

#[test]
fn dotted_titles_survive_plain_names() {
    let episode = Episode::seasoned(Series::new("Psych"), 8, 1).with_title("Mr. Robot");
    let name = NamingDefaults::shared()
        .naming_service()
        .name(&Entity::from(episode.clone()), &NamingParams::new())
        .unwrap();
    assert_eq!(name, "Psych S08E01 Mr. Robot");
    let parsed: Episode = ParsingDefaults::shared()
        .parsing_service()
        .parse_as(&name)
        .unwrap();
    assert_eq!(parsed, episode);
}

#[test]
fn degenerate_episode_range_parses_as_one_episode() {
    let parsed: Episode = ParsingDefaults::shared()
        .parsing_service()
        .parse_as("Psych S08E01-E01")
        .unwrap();
    assert_eq!(parsed, Episode::seasoned(Series::new("Psych"), 8, 1));

    let release: Release = ParsingDefaults::shared()
        .parsing_service()
        .parse_as("Psych.S08E01-E01.HDTV.x264-EXCELLENCE")
        .unwrap();
    assert_eq!(release.media.len(), 1);
    assert_eq!(rename("Psych S08E01-E01"), "Psych S08E01");
}

#[test]
fn unnumbered_titled_episode_decodes_as_series() {
    let episode = Episode {
        series: Some(Series::new("Psych")),
        title: Some("The Musical".into()),
        ..Default::default()
    };
    let name = NamingDefaults::shared()
        .naming_service()
        .name(&Entity::from(episode), &NamingParams::new())
        .unwrap();
    assert_eq!(name, "Psych The Musical");
    let parsed = ParsingDefaults::shared().parsing_service().parse(&name).unwrap();
    assert_eq!(parsed, Entity::from(Series::new("Psych The Musical")));
}

fn series_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z][a-z]{2,7}", 1..4).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn episode_releases_round_trip(
        name in series_name(),
        season in 1u32..100,
        first in 1u32..90,
        count in 1u32..5,
        group in "[A-Z]{3,8}",
    ) {
        let episodes: Vec<Media> = (first..first + count)
            .map(|n| Media::Episode(Episode::seasoned(Series::new(name.as_str()), season, n)))
            .collect();
        let mut release = Release::new(episodes[0].clone())
            .with_tags(["720p", "HDTV", "x264"])
            .with_group(group.as_str());
        release.media = episodes;

        let text = NamingDefaults::shared()
            .naming_service()
            .name(&Entity::from(release.clone()), &NamingParams::new())
            .unwrap();
        let parsed: Release = ParsingDefaults::shared()
            .parsing_service()
            .parse_as(&text)
            .unwrap();

        prop_assert_eq!(parsed, release.with_name(text));
    }
}
