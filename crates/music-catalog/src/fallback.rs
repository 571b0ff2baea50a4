//! Static fallback catalog
//!
//! Served when no YouTube API key is configured or the upstream call fails,
//! so the app keeps working without credentials.

use crate::Video;
use mood_classifier::Mood;

type Entry = (&'static str, &'static str, &'static str);

const HAPPY: &[Entry] = &[
    ("hwklZ35jkns", "Diljit Dosanjh - G.O.A.T", "Diljit Dosanjh"),
    ("jCbM-98tKjA", "Badshah - DJ Waley Babu", "Speed Records"),
    ("K4TOrB7at0Y", "Mundian To Bach Ke", "Panjabi MC"),
    ("kU0GMGO0Lms", "Kala Chashma - Baar Baar Dekho", "SonyMusicIndia"),
    ("2Vv-BfVoq4g", "Ed Sheeran - Perfect", "Ed Sheeran"),
    ("hT_nvWreIhg", "Katy Perry - Roar", "Katy Perry"),
    ("lYBUbBu4W08", "Pharrell Williams - Happy", "Pharrell Williams"),
    ("3JZ4pnNtycQ", "Mark Ronson - Uptown Funk", "Mark Ronson"),
];

const SAD: &[Entry] = &[
    ("hoNb6HuNmU0", "Tum Hi Ho - Aashiqui 2", "T-Series"),
    ("6n3pFFPSlW4", "Channa Mereya", "SonyMusicIndia"),
    ("s0e-9F8f15o", "Agar Tum Saath Ho - Tamasha", "T-Series"),
    ("r7X3bX3jj9U", "Alan Walker - The Spectre", "Alan Walker"),
    ("kY2D7c4mocM", "Alan Walker - Alone", "Alan Walker"),
    ("YQHsXMglC9A", "Adele - Hello", "Adele"),
    ("hcBWT4zMwvU", "Sam Smith - Stay With Me", "Sam Smith"),
];

const ANGRY: &[Entry] = &[
    ("UYzLvmxkgGE", "Mukkabaaz - Zinda", "FoxStarHindi"),
    ("8t0pp5v9Ln4", "Bhaag Milkha Bhaag", "SonyMusicIndia"),
    ("7wtfhZwyrcc", "Adele - Rolling in the Deep", "Adele"),
    ("kXYiU_JCYtU", "Linkin Park - Numb", "Linkin Park"),
    ("b8-mt2JwlK4", "System of a Down - Chop Suey", "System of a Down"),
    ("y6Sxv-sUYtM", "Nirvana - Smells Like Teen Spirit", "Nirvana"),
    ("C6J1J5f0lB4", "Eminem - Lose Yourself", "Eminem"),
];

const FEAR: &[Entry] = &[
    ("8nW-IPrzM1g", "The Neighbourhood - Sweater Weather", "The Neighbourhood"),
    ("yY-viFIvx9E", "Lana Del Rey - Summertime Sadness", "Lana Del Rey"),
    ("8J2lrGiAKGw", "Radiohead - Creep", "Radiohead"),
    ("4NRXx6U8ABQ", "The Weeknd - Blinding Lights", "The Weeknd"),
    ("j3-D2igOTqA", "Billie Eilish - Bad Guy", "Billie Eilish"),
    ("h9n2WBmJ1pE", "Hans Zimmer - Time", "Hans Zimmer"),
];

const SURPRISE: &[Entry] = &[
    ("fJ9rUzIMcZQ", "Queen - Bohemian Rhapsody", "Queen Official"),
    ("L_jWHffIx5E", "Smash Mouth - All Star", "Smash Mouth"),
    ("60ItHLz5WEA", "Led Zeppelin - Stairway to Heaven", "Led Zeppelin"),
    ("EE-xtCF3T94", "Tame Impala - The Less I Know The Better", "Tame Impala"),
    ("k85mRPqvMbE", "DJ Snake - Let Me Love You", "DJ Snake"),
    ("9bZkp7q19f0", "PSY - Gangnam Style", "Official PSY"),
];

const DISGUST: &[Entry] = &[
    ("kXYiU_JCYtU", "Linkin Park - Numb", "Linkin Park"),
    ("b8-mt2JwlK4", "System of a Down - Chop Suey", "System of a Down"),
    ("4-AnNhWlz4M", "Red Hot Chili Peppers - Californication", "Red Hot Chili Peppers"),
    ("hsm4poTWjMs", "Green Day - Boulevard of Broken Dreams", "Green Day"),
    ("tAGnKpE4NCI", "Eminem - Without Me", "Eminem"),
    ("8J2lrGiAKGw", "Radiohead - Creep", "Radiohead"),
];

const NEUTRAL: &[Entry] = &[
    ("jfKfPfyJRdk", "Lofi Hip Hop Radio", "Lofi Girl"),
    ("DWcJFNfaw9c", "Calm Piano Music", "Relaxing Music"),
    ("u0Fo8yKErWA", "Relaxing Jazz Music", "BGM channel"),
    ("V1bFr2SWP1I", "Ambient Music for Focus", "Yellow Brick Cinema"),
    ("h9n2WBmJ1pE", "Hans Zimmer - Time", "Hans Zimmer"),
    ("Q0CbN8sfihY", "Star Sky - Two Steps From Hell", "Two Steps From Hell"),
];

/// Static per-mood catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackCatalog;

impl FallbackCatalog {
    pub fn videos_for(&self, mood: Mood) -> Vec<Video> {
        let entries = match mood {
            Mood::Happy => HAPPY,
            Mood::Sad => SAD,
            Mood::Angry => ANGRY,
            Mood::Fear => FEAR,
            Mood::Surprise => SURPRISE,
            Mood::Disgust => DISGUST,
            Mood::Neutral => NEUTRAL,
        };

        entries
            .iter()
            .map(|(id, title, channel)| {
                let thumbnail = format!("https://img.youtube.com/vi/{id}/hqdefault.jpg");
                Video::youtube(id, title, channel, &thumbnail)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mood_has_fallback_entries() {
        let catalog = FallbackCatalog;
        for mood in Mood::ALL {
            assert!(!catalog.videos_for(mood).is_empty(), "no entries for {mood}");
        }
    }

    #[test]
    fn test_fallback_entries_carry_playable_urls() {
        let videos = FallbackCatalog.videos_for(Mood::Happy);
        for v in videos {
            assert!(v.youtube_url.is_some());
            assert!(v.thumbnail.contains(&v.id));
        }
    }
}
