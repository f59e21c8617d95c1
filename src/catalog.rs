//! Fixed choice lists offered by the match form.

pub const TEAMS: &[&str] = &[
    "Chennai Super Kings",
    "Delhi Capitals",
    "Gujarat Titans",
    "Kolkata Knight Riders",
    "Lucknow Super Giants",
    "Mumbai Indians",
    "Punjab Kings",
    "Rajasthan Royals",
    "Royal Challengers Bengaluru",
    "Sunrisers Hyderabad",
];

pub const VENUES: &[&str] = &[
    "Arun Jaitley Stadium, Delhi",
    "Barabati Stadium, Cuttack",
    "Barsapara Cricket Stadium, Guwahati",
    "Brabourne Stadium, Mumbai",
    "Dr DY Patil Sports Academy, Mumbai",
    "Dr. Y.S. Rajasekhara Reddy ACA-VDCA Cricket Stadium, Visakhapatnam",
    "Eden Gardens, Kolkata",
    "Ekana Cricket Stadium, Lucknow",
    "Feroz Shah Kotla Ground, Delhi",
    "Green Park, Kanpur",
    "Holkar Cricket Stadium, Indore",
    "Himachal Pradesh Cricket Association Stadium, Dharamsala",
    "JSCA International Stadium Complex, Ranchi",
    "MA Chidambaram Stadium, Chennai",
    "Maharaja Yadavindra Singh International Cricket Stadium, Mullanpur",
    "Maharashtra Cricket Association Stadium, Pune",
    "M. Chinnaswamy Stadium, Bengaluru",
    "Narendra Modi Stadium, Ahmedabad",
    "Punjab Cricket Association IS Bindra Stadium, Mohali",
    "Rajiv Gandhi International Stadium, Hyderabad",
    "Sardar Patel Stadium (Motera), Ahmedabad",
    "Saurashtra Cricket Association Stadium, Rajkot",
    "Shaheed Veer Narayan Singh International Stadium, Raipur",
    "Sawai Mansingh Stadium, Jaipur",
    "Subrata Roy Sahara Stadium, Pune",
    "Vidarbha Cricket Association Stadium, Nagpur",
    "Nehru Stadium, Indore",
];

pub const TOSS_DECISIONS: &[&str] = &["bat", "field"];

/// Teams that may bowl against `batting_team`.
pub fn bowling_options(batting_team: &str) -> Vec<&'static str> {
    TEAMS.iter().copied().filter(|t| *t != batting_team).collect()
}
