//! Target strain-gauge profile over one electrical period, one value per bucket.
//!
//! Measured on the bench with the drive running the uncompensated square wave; the compensation
//! loop scales it by the torque scale before comparing.

use crate::config::BUCKETS;

#[rustfmt::skip]
pub static STRAIN_REFERENCE: [f32; BUCKETS] = [
    0.089582141, 0.099175219, 0.107612321, 0.115616792, 0.121867346, 0.134995376, 0.143879305, 0.146976975,
    0.158717466, 0.167480296, 0.177856983, 0.185020222, 0.193782584, 0.201525057, 0.209224701, 0.222122934,
    0.226610622, 0.238858663, 0.249043318, 0.257343658, 0.262876793, 0.2769934, 0.283625804, 0.299789158,
    0.299252441, 0.315289292, 0.321006568, 0.336776175, 0.338349073, 0.353892834, 0.354776859, 0.370322224,
    0.385589038, 0.390123268, 0.397681418, 0.409673833, 0.41862636, 0.421588462, 0.426586565, 0.44438044,
    0.446800253, 0.447287436, 0.465195902, 0.46701272, 0.471459494, 0.489127792, 0.492761578, 0.501288597,
    0.502266238, 0.522327461, 0.519120943, 0.531651483, 0.539429486, 0.539552572, 0.558697757, 0.558659846,
    0.560812781, 0.577547348, 0.575272487, 0.591275048, 0.590271368, 0.607998767, 0.606802459, 0.616634118,
    0.627047734, 0.630218178, 0.63963175, 0.641765747, 0.651201737, 0.659021742, 0.661087274, 0.675812786,
    0.68563089, 0.687496595, 0.689246487, 0.707263648, 0.713624899, 0.715197202, 0.718446764, 0.738563704,
    0.739311322, 0.7399381, 0.753511633, 0.76216163, 0.758424764, 0.770826672, 0.780088691, 0.779581089,
    0.792085878, 0.800692403, 0.799917048, 0.80642909, 0.820891829, 0.819868567, 0.81996968, 0.83905916,
    0.836941088, 0.83679286, 0.854697245, 0.852213101, 0.862882655, 0.865346962, 0.86257087, 0.883987717,
    0.885240527, 0.88639504, 0.888994183, 0.900849202, 0.911205284, 0.901815161, 0.915254509, 0.926393182,
    0.926251688, 0.921149512, 0.944483805, 0.94493875, 0.944470454, 0.943902421, 0.962675096, 0.961999828,
    0.956136127, 0.974041808, 0.972258964, 0.971237669, 0.983166286, 0.991649837, 0.98626432, 0.985822862,
    1.00667873, 1.004337977, 0.996504151, 1.017494973, 1.015817742, 1.013133186, 1.023237365, 1.027266143,
    1.02994283, 1.027708412, 1.028832656, 1.041227383, 1.041328087, 1.05282938, 1.052838166, 1.041844412,
    1.05424007, 1.054075608, 1.06555675, 1.059421819, 1.053206896, 1.071523903, 1.070109112, 1.069622809,
    1.06480564, 1.076208295, 1.086670786, 1.086003401, 1.085275791, 1.083469199, 1.082619839, 1.082735708,
    1.093096769, 1.09292539, 1.09188439, 1.090785508, 1.106360293, 1.104132179, 1.09763338, 1.106890542,
    1.110863504, 1.105079382, 1.103641835, 1.118225547, 1.118903074, 1.107671018, 1.120123136, 1.119578585,
    1.109197444, 1.131486152, 1.11538211, 1.127829605, 1.12707133, 1.116323347, 1.138760548, 1.137884773,
    1.13248195, 1.125903046, 1.143967207, 1.138404767, 1.13843947, 1.137297382, 1.136108421, 1.147433162,
    1.147322189, 1.140277606, 1.13891855, 1.157211724, 1.145365958, 1.143895437, 1.159864425, 1.159505716,
    1.146215743, 1.156312978, 1.166463913, 1.149515456, 1.159595035, 1.169737862, 1.170427099, 1.169881979,
    1.159702479, 1.163859914, 1.176468408, 1.164886114, 1.171559425, 1.172009993, 1.16026643, 1.182607747,
    1.17193509, 1.169795443, 1.182390588, 1.170311884, 1.188068155, 1.177103549, 1.174783698, 1.186134773,
    1.175003987, 1.185083926, 1.18387757, 1.195257805, 1.183877784, 1.187891591, 1.194181088, 1.182648654,
    1.191428059, 1.191276115, 1.183416581, 1.199883053, 1.18806115, 1.204888036, 1.192954129, 1.190039251,
    1.208800733, 1.198919569, 1.20073918, 1.201215665, 1.214841956, 1.204673569, 1.21053913, 1.213537856,
    1.201804015, 1.219469483, 1.222402468, 1.211795921, 1.217345414, 1.224255602, 1.208296652, 1.232883999,
    1.221958391, 1.221942753, 1.234290607, 1.23007964, 1.217541123, 1.242352019, 1.231041974, 1.231154145,
    1.244922203, 1.233439862, 1.231731252, 1.245488312, 1.235239843, 1.233421616, 1.245754125, 1.228633922,
    1.252350747, 1.241825299, 1.240181813, 1.254094895, 1.243564355, 1.230165736, 1.242575872, 1.244939855,
    1.227799728, 1.238753432, 1.242517955, 1.228906888, 1.239865542, 1.243599422, 1.232774581, 1.230648361,
    1.244539807, 1.229969682, 1.232161322, 1.235808346, 1.221904177, 1.2328186, 1.236435467, 1.225350709,
    1.22305192, 1.231783927, 1.222095184, 1.219742631, 1.232124509, 1.216451032, 1.214040874, 1.227875792,
    1.216545149, 1.203748378, 1.222772404, 1.206933863, 1.204469685, 1.219181652, 1.199786272, 1.198178973,
    1.202482129, 1.180238742, 1.200463, 1.181147852, 1.180997417, 1.183787519, 1.163101678, 1.174651672,
    1.168620784, 1.156755726, 1.171217889, 1.144500075, 1.155966026, 1.149947919, 1.138128523, 1.152489897,
    1.133385921, 1.127394302, 1.128634841, 1.1281792, 1.114973359, 1.114755565, 1.115977064, 1.109992574,
    1.098280847, 1.106659442, 1.08637702, 1.087560891, 1.097095104, 1.079705927, 1.080927302, 1.064085595,
    1.068496814, 1.051777472, 1.043564566, 1.047930343, 1.028883229, 1.033218067, 1.0209668, 1.012909079,
    1.019951739, 0.992845091, 0.997100633, 0.994574612, 0.977239949, 0.984377947, 0.969823352, 0.962025534,
    0.959563805, 0.942604038, 0.946743912, 0.929924402, 0.931426988, 0.913699408, 0.917775243, 0.914106346,
    0.897643778, 0.892757027, 0.899329383, 0.874218715, 0.881982243, 0.859643941, 0.867545258, 0.855312649,
    0.848591366, 0.845839314, 0.830877026, 0.828164581, 0.81221125, 0.808347598, 0.790809169, 0.794082767,
    0.783238428, 0.772491497, 0.774542297, 0.75128814, 0.749898292, 0.742842698, 0.732468173, 0.726017364,
    0.719078449, 0.716620466, 0.702031795, 0.702902095, 0.68094248, 0.679656805, 0.677293445, 0.662653465,
    0.667730747, 0.645480068, 0.648395717, 0.628606555, 0.628414441, 0.621105363, 0.606844093, 0.602679843,
    0.603919206, 0.586018687, 0.589783243, 0.571328021, 0.575123218, 0.556971248, 0.553167236, 0.549379555,
    0.547469136, 0.532101492, 0.528414588, 0.525651068, 0.513897608, 0.513867229, 0.496135064, 0.496117174,
    0.49347272, 0.482548653, 0.479100861, 0.469732304, 0.464668079, 0.462143207, 0.448880785, 0.443969392,
    0.440714551, 0.431048063, 0.430569839, 0.421051833, 0.413225032, 0.413233587, 0.397094134, 0.400158331,
    0.391087669, 0.386612161, 0.380983073, 0.370738863, 0.367142861, 0.36428162, 0.362149321, 0.349428913,
    0.346664525, 0.343913992, 0.335692699, 0.329205762, 0.326553145, 0.326586659, 0.312079379, 0.312125092,
    0.309566871, 0.29744458, 0.29749561, 0.286528468, 0.289064376, 0.281114894, 0.272702437, 0.269779761,
    0.266878055, 0.267528812, 0.253625063, 0.253697333, 0.248293258, 0.245550814, 0.24282866, 0.234636761,
    0.237444914, 0.22457002, 0.226779962, 0.216860479, 0.216617987, 0.214118348, 0.20405086, 0.204070111,
    0.19961969, 0.19232602, 0.192351638, 0.185704447, 0.182918273, 0.183127181, 0.171574412, 0.173917723,
    0.1716793, 0.164984587, 0.158020373, 0.155926343, 0.155985763, 0.147348122, 0.145352776, 0.142968843,
    0.140611583, 0.138678709, 0.136369843, 0.130223993, 0.124250436, 0.122106847, 0.122318154, 0.120197552,
    0.116309745, 0.110413399, 0.110153662, 0.110234837, 0.104548594, 0.099042955, 0.098922488, 0.098688056,
    0.093389441, 0.088609316, 0.08694819, 0.085308129, 0.0854494, 0.0806562, 0.079096504, 0.075977275,
    0.074478249, 0.072999189, 0.071539954, 0.069839017, 0.065617898, 0.061307593, 0.060006708, 0.059978882,
    0.05846206, 0.057202387, 0.055732462, 0.051626943, 0.050465941, 0.049322448, 0.049038034, 0.04524844,
    0.043047358, 0.041823221, 0.040621946, 0.040570173, 0.037016379, 0.035905613, 0.032767711, 0.031739081,
    0.031545466, 0.031390574, 0.03039201, 0.027404971, 0.026479051, 0.024003488, 0.023151443, 0.022184784,
    0.021374694, 0.021389139, 0.02047118, 0.019578283, 0.018831253, 0.016482251, 0.014941096, 0.014413214,
    0.013693192, 0.012995741, 0.012822759, 0.010371352, 0.010421633, 0.009609203, 0.00930245, 0.007103612,
    0.006395479, 0.005823187, 0.004833938, 0.00429604, 0.004331504, 0.003835271, 0.003380463, 0.003296155,
    0.002174269, 0.001870488, 0.001562933, 0.001176881, 0.001167176, 0.000971465, 0.001117708, 0.000594722,
    0.000473611, 0.000357968, 0.000273803, 0.000157151, 0.000104879, 0.000109343, 6.93108e-05, 4.06422e-05,
    2.13282e-05, 9.4338e-06, 3.096e-06, 5.256e-07, 0., 6.84e-07, 6.768e-07, 3.447e-06,
    1.0899e-05, 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 0., 0., 0., 0., 0.,
    0., 0., 0., 1.13724e-05, 1.1367e-05, 4.5882e-06, 3.6828e-06, 3.6846e-06,
    9.342e-07, 7.02e-08, 1.08e-08, 2.232e-07, 6.822e-07, 4.788e-07, 2.358e-06, 4.446e-07,
    2.2572e-06, 2.8026e-06, 7.2882e-06, 1.53918e-05, 2.74554e-05, 2.69334e-05, 4.38768e-05, 6.67602e-05,
    6.02406e-05, 8.8119e-05, 5.76216e-05, 8.36172e-05, 0.000116458, 0.000113715, 0.000147524, 0.00015086,
    0.000180783, 0.000212139, 0.000246031, 0.000283972, 0.00032306, 0.000362997, 0.000358022, 0.000401839,
    0.000446695, 0.000428933, 0.000475857, 0.000525352, 0.000460492, 0.000507247, 0.000619711, 0.000674154,
    0.000597935, 0.000651514, 0.000705121, 0.000760995, 0.000760217, 0.000818402, 0.000878891, 0.000927277,
    0.000926584, 0.000988351, 0.001052275, 0.001118367, 0.001183471, 0.001250584, 0.001319648, 0.001301956,
    0.001372379, 0.001444797, 0.001515638, 0.001588334, 0.001662896, 0.001739333, 0.001817658, 0.00189788,
    0.001872884, 0.001950388, 0.00203123, 0.002113506, 0.002197753, 0.0022795, 0.002367653, 0.002453152,
    0.002540504, 0.002607851, 0.002698506, 0.002786024, 0.002875268, 0.002966256, 0.003059001, 0.003153517,
    0.003244318, 0.003497722, 0.003600171, 0.003692642, 0.003987077, 0.004085453, 0.004185254, 0.004286587,
    0.004389464, 0.004487303, 0.00443039, 0.004535582, 0.004635603, 0.004737028, 0.004839863, 0.004937116,
    0.005042713, 0.005142569, 0.005224819, 0.005707535, 0.005818316, 0.005968316, 0.006120508, 0.00652219,
    0.006675183, 0.006830127, 0.006943106, 0.006887268, 0.007488707, 0.007645613, 0.007804224, 0.008022872,
    0.008175987, 0.008340574, 0.008496684, 0.009126238, 0.009281848, 0.009449572, 0.009876407, 0.010039477,
    0.010542839, 0.010701041, 0.010799689, 0.011316384, 0.011218207, 0.011380669, 0.011531282, 0.012295843,
    0.012454873, 0.012614501, 0.013022221, 0.01356593, 0.013436001, 0.013602116, 0.013803084, 0.015581669,
    0.017872646, 0.019958053, 0.021851114, 0.024013364, 0.025568914, 0.026885822, 0.028369046, 0.031578617,
    0.033921662, 0.035903167, 0.038308505, 0.039754795, 0.041163444, 0.044927032, 0.046323821, 0.047679473,
    0.049858317, 0.053729717, 0.056286261, 0.057512459, 0.059423747, 0.064104799, 0.065197526, 0.066231596,
    0.071553791, 0.074063759, 0.074995081, 0.076720928, 0.081591856, 0.082370615, 0.087096213, 0.087679615,
];
